//! Extruder configuration.

use crate::mid_point::TipSize;
use crate::tip::TipType;

/// Descriptor for creating a [`FatLine`](crate::FatLine).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FatLineConfig {
    /// Tip radius range in screen units.
    pub tip_size: TipSize,
    /// Tip shape.
    pub tip_type: TipType,
    /// Upper bound on points per rounded corner or cap.
    pub turn_verts: u32,
    /// Samples closer than this to the last accepted one are dropped.
    pub min_screen_travel_threshold: f32,
    /// Number of trailing vertices per side revisited by simplification.
    pub simplify_window: usize,
    /// Maximum deviation, in screen units, simplification may introduce.
    pub simplify_threshold: f32,
}

impl FatLineConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a pressure-insensitive tip radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.tip_size = TipSize::uniform(radius);
        self
    }

    /// Set the tip radius range.
    pub fn with_tip_size(mut self, tip_size: TipSize) -> Self {
        self.tip_size = tip_size;
        self
    }

    /// Set the tip shape.
    pub fn with_tip_type(mut self, tip_type: TipType) -> Self {
        self.tip_type = tip_type;
        self
    }

    /// Set the number of points per rounded corner or cap.
    pub fn with_turn_verts(mut self, turn_verts: u32) -> Self {
        self.turn_verts = turn_verts;
        self
    }

    /// Set the minimum screen travel between accepted samples.
    pub fn with_min_screen_travel_threshold(mut self, threshold: f32) -> Self {
        self.min_screen_travel_threshold = threshold;
        self
    }

    /// Set the tail simplification window and tolerance.
    pub fn with_simplification(mut self, window: usize, threshold: f32) -> Self {
        self.simplify_window = window;
        self.simplify_threshold = threshold;
        self
    }
}

impl Default for FatLineConfig {
    fn default() -> Self {
        Self {
            tip_size: TipSize::uniform(30.0),
            tip_type: TipType::Round,
            turn_verts: 20,
            min_screen_travel_threshold: 1.0,
            simplify_window: 15,
            simplify_threshold: 0.1,
        }
    }
}
