//! Math type aliases and helper functions.
//!
//! Everything in the stroke pipeline is planar, so transforms are 3x3
//! homogeneous matrices acting on [`Vec2`] points.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 4D vector (f32), used for RGBA colors.
pub type Vec4 = nalgebra::Vector4<f32>;

/// 3x3 homogeneous matrix (f32) for 2D affine transforms.
pub type Mat3 = nalgebra::Matrix3<f32>;

/// Transform a point (w = 1) by a 2D homogeneous matrix.
pub fn transform_point2(m: &Mat3, p: Vec2) -> Vec2 {
    let h = m * nalgebra::Vector3::new(p.x, p.y, 1.0);
    Vec2::new(h.x, h.y)
}

/// Build a matrix that scales first, then translates.
pub fn mat3_from_scale_translation(scale: Vec2, translation: Vec2) -> Mat3 {
    #[rustfmt::skip]
    let result = Mat3::new(
        scale.x, 0.0,     translation.x,
        0.0,     scale.y, translation.y,
        0.0,     0.0,     1.0,
    );
    result
}

/// Build a translation-only 3x3 matrix.
pub fn mat3_from_translation(t: Vec2) -> Mat3 {
    Mat3::new_translation(&t)
}

/// Z component of the 3D cross product of two planar vectors.
///
/// Positive when `b` is counter-clockwise from `a` in a y-up frame.
pub fn cross2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Left-hand normal of `v` (rotated +90 degrees in a y-up frame).
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unit vector in the direction of `v`, or `None` if `v` is (nearly) zero.
pub fn try_normalize2(v: Vec2) -> Option<Vec2> {
    v.try_normalize(f32::EPSILON)
}

/// Rotate `v` counter-clockwise by `angle` radians.
pub fn rotate2(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Signed area of the triangle `(a, b, c)`; positive for counter-clockwise
/// winding in a y-up frame.
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * cross2(b - a, c - a)
}

/// Distance from `p` to the segment `[a, b]`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f32::EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
