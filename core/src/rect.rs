//! Axis-aligned rectangles.
//!
//! Incremental operations report "what changed" as `Option<Rect>`, where
//! `None` means nothing was touched. [`join_into`] and [`Rect::envelope`]
//! are the two ways those bounds get accumulated.

use crate::math::{Mat3, Vec2, transform_point2};

/// An axis-aligned rectangle spanning `from` (minimum corner) to `to`
/// (maximum corner).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Minimum corner.
    pub from: Vec2,
    /// Maximum corner.
    pub to: Vec2,
}

impl Rect {
    /// Create a rectangle from any two opposite corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            from: a.inf(&b),
            to: a.sup(&b),
        }
    }

    /// A zero-sized rectangle at `p`.
    pub fn at_point(p: Vec2) -> Self {
        Self { from: p, to: p }
    }

    /// Smallest rectangle enclosing every point, or `None` for no points.
    pub fn envelope(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut result: Option<Rect> = None;
        for p in points {
            join_into(&mut result, Rect::at_point(p));
        }
        result
    }

    /// Width (x extent).
    pub fn width(&self) -> f32 {
        self.to.x - self.from.x
    }

    /// Height (y extent).
    pub fn height(&self) -> f32 {
        self.to.y - self.from.y
    }

    /// Center point.
    pub fn center(&self) -> Vec2 {
        (self.from + self.to) * 0.5
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn join(&self, other: &Rect) -> Rect {
        Rect {
            from: self.from.inf(&other.from),
            to: self.to.sup(&other.to),
        }
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Rect {
        let d = Vec2::new(amount, amount);
        Rect {
            from: self.from - d,
            to: self.to + d,
        }
    }

    /// Whether `p` lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.from.x && p.x <= self.to.x && p.y >= self.from.y && p.y <= self.to.y
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        self.contains_point(other.from) && self.contains_point(other.to)
    }

    /// The four corners, counter-clockwise from `from`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.from,
            Vec2::new(self.to.x, self.from.y),
            self.to,
            Vec2::new(self.from.x, self.to.y),
        ]
    }

    /// Bounding rectangle of this rectangle's corners mapped through `m`.
    pub fn transform(&self, m: &Mat3) -> Rect {
        let [a, b, c, d] = self.corners().map(|p| transform_point2(m, p));
        Rect::new(a, b).join(&Rect::new(c, d))
    }
}

/// Join `rect` into an optional accumulator, initializing it if empty.
pub fn join_into(target: &mut Option<Rect>, rect: Rect) {
    *target = Some(match target {
        Some(existing) => existing.join(&rect),
        None => rect,
    });
}

/// Join two optional rectangles.
pub fn join_opt(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.join(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mat3_from_scale_translation;

    #[test]
    fn new_orders_corners() {
        let r = Rect::new(Vec2::new(5.0, -1.0), Vec2::new(-2.0, 3.0));
        assert_eq!(r.from, Vec2::new(-2.0, -1.0));
        assert_eq!(r.to, Vec2::new(5.0, 3.0));
        assert_eq!(r.width(), 7.0);
        assert_eq!(r.height(), 4.0);
    }

    #[test]
    fn envelope_of_points() {
        let r = Rect::envelope([
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 4.0),
            Vec2::new(3.0, 0.0),
        ])
        .unwrap();
        assert_eq!(r, Rect::new(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 4.0)));
        assert!(Rect::envelope(std::iter::empty()).is_none());
    }

    #[test]
    fn join_and_contains() {
        let a = Rect::at_point(Vec2::new(0.0, 0.0));
        let b = Rect::new(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0));
        let j = a.join(&b);
        assert!(j.contains(&a));
        assert!(j.contains(&b));
        assert!(!b.contains(&j));
        assert!(j.inflate(1.0).contains_point(Vec2::new(-1.0, 4.0)));
    }

    #[test]
    fn optional_joins() {
        let mut acc = None;
        join_into(&mut acc, Rect::at_point(Vec2::new(1.0, 2.0)));
        join_into(&mut acc, Rect::at_point(Vec2::new(-1.0, 0.0)));
        assert_eq!(acc, Some(Rect::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 2.0))));
        assert_eq!(join_opt(None, acc), acc);
        assert_eq!(join_opt(None, None), None);
    }

    #[test]
    fn transform_flipping_scale() {
        let r = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0));
        let m = mat3_from_scale_translation(Vec2::new(-2.0, 1.0), Vec2::new(0.0, 5.0));
        let t = r.transform(&m);
        assert_eq!(t, Rect::new(Vec2::new(-2.0, 5.0), Vec2::new(0.0, 7.0)));
    }
}
