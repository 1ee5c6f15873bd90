//! Accepted input samples and the tip size they were extruded with.

use quill_core::math::Vec2;

/// Seconds on the input clock.
pub type InputTimeS = f64;

/// Stylus state at the time of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylusState {
    /// Normalized pressure in `0..=1`. Mice and fingers report 1.
    pub pressure: f32,
    /// Radians from perpendicular to the surface.
    pub tilt: f32,
    /// Radians, counter-clockwise from the +x axis.
    pub orientation: f32,
}

impl Default for StylusState {
    fn default() -> Self {
        Self {
            pressure: 1.0,
            tilt: 0.0,
            orientation: 0.0,
        }
    }
}

impl StylusState {
    pub fn with_pressure(pressure: f32) -> Self {
        Self {
            pressure,
            ..Self::default()
        }
    }
}

/// Tip radius in screen units, interpolated by pressure between
/// `min_radius` (no pressure) and `radius` (full pressure).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TipSize {
    pub radius: f32,
    pub min_radius: f32,
}

impl TipSize {
    pub fn new(radius: f32, min_radius: f32) -> Self {
        Self { radius, min_radius }
    }

    /// A pressure-insensitive tip.
    pub fn uniform(radius: f32) -> Self {
        Self::new(radius, radius)
    }

    /// Radius after pressure modulation.
    pub fn radius_at(&self, pressure: f32) -> f32 {
        let t = if pressure.is_finite() { pressure.clamp(0.0, 1.0) } else { 1.0 };
        self.min_radius + (self.radius - self.min_radius) * t
    }
}

/// One accepted input sample on a stroke's center line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidPoint {
    pub screen_position: Vec2,
    pub time: InputTimeS,
    pub stylus: StylusState,
    /// Tip radius after pressure modulation.
    pub radius: f32,
    /// Unit direction of travel into this point. `None` until the line has
    /// moved.
    pub direction: Option<Vec2>,
    /// Radius of the mid-point before this one (equal to `radius` for the
    /// first point).
    pub previous_radius: f32,
}
