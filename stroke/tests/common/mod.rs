//! Shared helpers for the stroke integration tests.

#![allow(dead_code)]

use quill_core::math::Vec2;
use quill_stroke::{FatLine, FatLineConfig, TipType};

/// Initialize logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Extruder with a uniform tip and a 1px travel threshold.
pub fn test_line(tip_type: TipType, radius: f32, turn_verts: u32) -> FatLine {
    FatLine::new(
        FatLineConfig::new()
            .with_radius(radius)
            .with_tip_type(tip_type)
            .with_turn_verts(turn_verts)
            .with_min_screen_travel_threshold(1.0),
    )
}

/// A wavy polyline, sampled every `step` along x.
pub fn wave(n: usize, step: f32) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let x = i as f32 * step;
            Vec2::new(x, (x * 0.15).sin() * 25.0)
        })
        .collect()
}

/// Feed `points` at 60Hz.
pub fn extrude_all(line: &mut FatLine, points: &[Vec2], simplify: bool) {
    for (i, p) in points.iter().enumerate() {
        line.extrude(*p, i as f64 / 60.0, false, simplify);
    }
}

pub fn all_finite(line: &FatLine) -> bool {
    line.start_cap()
        .iter()
        .chain(line.forward_line())
        .chain(line.backward_line())
        .chain(line.end_cap())
        .all(|v| v.position.iter().all(|c| c.is_finite()))
}
