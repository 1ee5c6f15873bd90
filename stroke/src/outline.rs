use quill_core::math::{Mat3, Vec2, transform_point2};

use crate::fat_line::FatLine;

impl FatLine {
    /// Concatenate the outlines of a chain of extruders into one closed
    /// polygon, mapped through `screen_to_object`.
    ///
    /// The order is the first line's start cap, every forward side in
    /// order, the last line's end cap, then every backward side reversed
    /// in reverse line order.
    pub fn outline_as_array(lines: &[FatLine], screen_to_object: &Mat3) -> Vec<Vec2> {
        let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
            return Vec::new();
        };
        let len = first.start_cap().len()
            + last.end_cap().len()
            + lines
                .iter()
                .map(|l| l.forward_line().len() + l.backward_line().len())
                .sum::<usize>();

        let mut out = Vec::with_capacity(len);
        let forward = lines.iter().flat_map(|l| l.forward_line());
        let backward = lines.iter().rev().flat_map(|l| l.backward_line().iter().rev());
        out.extend(
            first
                .start_cap()
                .iter()
                .chain(forward)
                .chain(last.end_cap())
                .chain(backward)
                .map(|v| transform_point2(screen_to_object, v.position)),
        );
        out
    }
}
