use criterion::{Criterion, black_box, criterion_group, criterion_main};

use quill_core::math::Vec2;
use quill_stroke::{FatLine, FatLineConfig, TipType, build_line_mesh};

/// A stylus-like path: a slow spiral sampled at roughly 2px spacing.
fn spiral(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.02;
            let r = 50.0 + t * 10.0;
            Vec2::new(r * t.cos(), r * t.sin())
        })
        .collect()
}

fn extrude(points: &[Vec2], tip_type: TipType, simplify: bool) -> FatLine {
    let mut line = FatLine::new(FatLineConfig::new().with_radius(8.0).with_tip_type(tip_type));
    for (i, p) in points.iter().enumerate() {
        line.extrude(*p, i as f64 / 120.0, false, simplify);
    }
    line.build_end_cap();
    line
}

// ---------------------------------------------------------------------------
// Extrusion
// ---------------------------------------------------------------------------

fn bench_extrude_round(c: &mut Criterion) {
    let points = spiral(2000);
    c.bench_function("extrude_round_2k", |b| {
        b.iter(|| extrude(black_box(&points), TipType::Round, false));
    });
}

fn bench_extrude_simplified(c: &mut Criterion) {
    let points = spiral(2000);
    c.bench_function("extrude_round_simplified_2k", |b| {
        b.iter(|| extrude(black_box(&points), TipType::Round, true));
    });
}

fn bench_extrude_chisel(c: &mut Criterion) {
    let points = spiral(2000);
    c.bench_function("extrude_chisel_2k", |b| {
        b.iter(|| extrude(black_box(&points), TipType::Chisel, false));
    });
}

// ---------------------------------------------------------------------------
// Triangulation
// ---------------------------------------------------------------------------

fn bench_build_line_mesh(c: &mut Criterion) {
    let line = extrude(&spiral(2000), TipType::Round, true);
    c.bench_function("build_line_mesh_2k", |b| {
        b.iter(|| build_line_mesh(black_box(std::slice::from_ref(&line))));
    });
}

criterion_group!(
    benches,
    bench_extrude_round,
    bench_extrude_simplified,
    bench_extrude_chisel,
    bench_build_line_mesh,
);
criterion_main!(benches);
