//! Ramer-Douglas-Peucker over the tail of an outline side.

use quill_core::math::{Vec2, distance_to_segment};
use quill_core::mesh::Vertex;

/// Flags the points of `points` that RDP keeps at `threshold`.
///
/// Both endpoints are always kept. Every dropped point lies within
/// `threshold` of the chord between its nearest kept neighbours.
pub fn rdp_keep(points: &[Vec2], threshold: f32) -> Vec<bool> {
    let mut keep = vec![false; points.len()];
    if points.len() <= 2 {
        keep.fill(true);
        return keep;
    }
    let last = points.len() - 1;
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0, last)];
    while let Some((first, end)) = stack.pop() {
        if end <= first + 1 {
            continue;
        }
        let (a, b) = (points[first], points[end]);
        let mut max_dist = 0.0;
        let mut max_idx = first;
        for (i, p) in points.iter().enumerate().take(end).skip(first + 1) {
            let d = distance_to_segment(*p, a, b);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > threshold {
            keep[max_idx] = true;
            stack.push((first, max_idx));
            stack.push((max_idx, end));
        }
    }
    keep
}

/// Simplifies the last `window` vertices of `verts` in place.
///
/// Returns the number of vertices removed. Retained vertices are not
/// modified.
pub fn simplify_tail(verts: &mut Vec<Vertex>, window: usize, threshold: f32) -> usize {
    let window = window.min(verts.len());
    if window < 3 {
        return 0;
    }
    let start = verts.len() - window;
    let positions: Vec<Vec2> = verts[start..].iter().map(|v| v.position).collect();
    let keep = rdp_keep(&positions, threshold);

    let before = verts.len();
    let mut flags = keep.into_iter();
    let mut i = 0;
    verts.retain(|_| {
        let kept = i < start || flags.next().unwrap_or(true);
        i += 1;
        kept
    });
    before - verts.len()
}
