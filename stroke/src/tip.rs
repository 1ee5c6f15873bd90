//! Tip models: the silhouette of the pen at one point of the line.
//!
//! The set of shapes is closed, so [`TipModel`] is an enum with one variant
//! per [`TipType`]. Every function here is pure and produces a point count
//! that depends only on its arguments, so callers can size buffers up front.
//!
//! Sides are named for a y-up frame: `Forward` is the left-hand normal of
//! the direction of travel, `Backward` the right-hand one. In a y-down
//! screen frame the names swap sides visually but the outline is the same.

use std::f32::consts::{FRAC_PI_4, PI, SQRT_2};

use quill_core::math::{Vec2, cross2, perp, rotate2, try_normalize2};

/// Turns sharper than this (radians) get turn points.
pub const MIN_TURN_RADIANS: f32 = 0.1;

/// Nib angle of the chisel tip, counter-clockwise from +x.
pub const CHISEL_NIB_ANGLE: f32 = FRAC_PI_4;

/// Tip shape tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TipType {
    #[default]
    Round,
    Square,
    /// Calligraphy nib held at a fixed angle.
    Chisel,
}

/// One side of the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Forward,
    Backward,
}

/// Turn points for one corner, all on `side`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnPoints {
    pub side: Option<Side>,
    pub points: Vec<Vec2>,
}

/// Outline geometry for one tip shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TipModel {
    Round,
    Square,
    /// `nib` is the unit half-width direction of the nib.
    Chisel { nib: Vec2 },
}

impl TipModel {
    pub fn new(tip_type: TipType) -> Self {
        match tip_type {
            TipType::Round => Self::Round,
            TipType::Square => Self::Square,
            TipType::Chisel => Self::Chisel {
                nib: rotate2(Vec2::x(), CHISEL_NIB_ANGLE),
            },
        }
    }

    pub fn tip_type(&self) -> TipType {
        match self {
            Self::Round => TipType::Round,
            Self::Square => TipType::Square,
            Self::Chisel { .. } => TipType::Chisel,
        }
    }

    /// Forward and backward outline points at `center` for unit direction
    /// `dir`.
    pub fn offset_points(&self, center: Vec2, radius: f32, dir: Vec2) -> (Vec2, Vec2) {
        let offset = match self {
            Self::Round | Self::Square => perp(dir) * radius,
            Self::Chisel { nib } => {
                let v = nib * radius;
                if cross2(dir, v) >= 0.0 { v } else { -v }
            }
        };
        (center + offset, center - offset)
    }

    /// Points rounding the outer side of a corner at `center` where the
    /// line turns from `dir_in` to `dir_out` (both unit).
    ///
    /// Left turns put the points on the backward side, right turns on the
    /// forward side. Shallow turns, zero radius, zero directions and
    /// `turn_verts == 0` yield no points.
    pub fn turn_points(
        &self,
        center: Vec2,
        radius: f32,
        dir_in: Vec2,
        dir_out: Vec2,
        turn_verts: u32,
    ) -> TurnPoints {
        let none = TurnPoints::default();
        if turn_verts == 0 || !(radius > 0.0) {
            return none;
        }
        let (Some(dir_in), Some(dir_out)) = (try_normalize2(dir_in), try_normalize2(dir_out))
        else {
            return none;
        };
        let angle = cross2(dir_in, dir_out).atan2(dir_in.dot(&dir_out));
        if angle.abs() < MIN_TURN_RADIANS {
            return none;
        }

        let (side, outer_in) = if angle > 0.0 {
            (Side::Backward, -perp(dir_in))
        } else {
            (Side::Forward, perp(dir_in))
        };

        let points = match self {
            Self::Round => {
                // Tolerance keeps exact fractions of a half turn from rounding up.
                let share = turn_verts as f32 * angle.abs() / PI - 1e-4;
                let count = (share.ceil() as u32).clamp(1, turn_verts);
                (1..=count)
                    .map(|i| {
                        let t = i as f32 / (count + 1) as f32;
                        center + rotate2(outer_in, angle * t) * radius
                    })
                    .collect()
            }
            Self::Square => {
                let outer_out = rotate2(outer_in, angle);
                let bisector = try_normalize2(outer_in + outer_out).unwrap_or(dir_in);
                let half = 0.5 * angle.abs();
                let mitre = (radius / half.cos().max(f32::EPSILON)).min(radius * SQRT_2);
                vec![center + bisector * mitre]
            }
            Self::Chisel { .. } => return none,
        };
        TurnPoints {
            side: Some(side),
            points,
        }
    }

    /// Cap points behind `center`, ordered from the backward offset to the
    /// forward offset (both excluded).
    ///
    /// Round caps use `turn_verts` rounded up to an odd count so the middle
    /// point sits on the apex, a full radius behind `center`.
    pub fn start_cap(&self, center: Vec2, radius: f32, dir: Vec2, turn_verts: u32) -> Vec<Vec2> {
        if !(radius > 0.0) {
            return Vec::new();
        }
        let n = perp(dir);
        match self {
            Self::Round => arc(center, -n * radius, turn_verts | 1),
            Self::Square => vec![
                center + (-n - dir) * radius,
                center + (n - dir) * radius,
            ],
            Self::Chisel { .. } => Vec::new(),
        }
    }

    /// Cap points ahead of `center`, ordered from the forward offset to the
    /// backward offset (both excluded). Round caps reach the apex as in
    /// [`start_cap`](Self::start_cap).
    pub fn end_cap(&self, center: Vec2, radius: f32, dir: Vec2, turn_verts: u32) -> Vec<Vec2> {
        if !(radius > 0.0) {
            return Vec::new();
        }
        let n = perp(dir);
        match self {
            Self::Round => arc(center, n * radius, turn_verts | 1),
            Self::Square => vec![
                center + (n + dir) * radius,
                center + (-n + dir) * radius,
            ],
            Self::Chisel { .. } => Vec::new(),
        }
    }
}

/// `count` points strictly inside the clockwise half turn starting at
/// `center + start`.
fn arc(center: Vec2, start: Vec2, count: u32) -> Vec<Vec2> {
    (1..=count)
        .map(|i| center + rotate2(start, -PI * i as f32 / (count + 1) as f32))
        .collect()
}
