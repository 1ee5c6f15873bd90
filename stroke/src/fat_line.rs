//! Incremental stroke outline extrusion.
//!
//! A [`FatLine`] turns a stream of input samples into two offset curves
//! (forward and backward) plus start and end caps. Each accepted sample
//! becomes a [`MidPoint`]; each call to [`FatLine::extrude`] reports the
//! bounds of the vertices it added so a renderer can upload them right away.
//!
//! Long strokes may be split across several extruders: the next one is
//! chained onto the previous with [`FatLine::set_start_cap_to_line_back`], and
//! the full polygon is recovered with [`FatLine::outline_as_array`].

use std::fmt;
use std::sync::Arc;

use quill_core::math::{Vec2, try_normalize2};
use quill_core::mesh::Vertex;
use quill_core::rect::join_opt;
use quill_core::{Rect, profile_function};

use crate::config::FatLineConfig;
use crate::mid_point::{InputTimeS, MidPoint, StylusState, TipSize};
use crate::simplify::simplify_tail;
use crate::tip::{Side, TipModel, TipType};

/// What a vertex callback learns about the vertex it is stamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexStamp {
    /// Center of the mid-point the vertex was extruded from.
    pub center: Vec2,
    pub radius: f32,
    pub time: InputTimeS,
    pub pressure: f32,
}

impl VertexStamp {
    fn of(pt: &MidPoint) -> Self {
        Self {
            center: pt.screen_position,
            radius: pt.radius,
            time: pt.time,
            pressure: pt.stylus.pressure,
        }
    }
}

/// Called for every new outline vertex, typically to write color or shader
/// data.
pub type VertAddFn = Arc<dyn Fn(&VertexStamp, &mut Vertex) + Send + Sync>;

/// Outline extruder for one stroke segment.
#[derive(Clone)]
pub struct FatLine {
    on_add_vert: Option<VertAddFn>,
    min_screen_travel_threshold: f32,
    tip_size: TipSize,
    stylus_state: StylusState,
    tip_model: TipModel,
    turn_verts: u32,
    simplify_window: usize,
    simplify_threshold: f32,

    fwd: Vec<Vertex>,
    back: Vec<Vertex>,
    start_cap: Vec<Vertex>,
    end_cap: Vec<Vertex>,
    pts: Vec<MidPoint>,
    /// Last mid-point of the extruder this one continues.
    join_point: Option<MidPoint>,
    end_cap_built: bool,
}

impl Default for FatLine {
    fn default() -> Self {
        Self::new(FatLineConfig::default())
    }
}

impl FatLine {
    pub fn new(config: FatLineConfig) -> Self {
        Self {
            on_add_vert: None,
            min_screen_travel_threshold: config.min_screen_travel_threshold,
            tip_size: config.tip_size,
            stylus_state: StylusState::default(),
            tip_model: TipModel::new(config.tip_type),
            turn_verts: config.turn_verts,
            simplify_window: config.simplify_window,
            simplify_threshold: config.simplify_threshold,
            fwd: Vec::new(),
            back: Vec::new(),
            start_cap: Vec::new(),
            end_cap: Vec::new(),
            pts: Vec::new(),
            join_point: None,
            end_cap_built: false,
        }
    }

    /// Accept a new input sample.
    ///
    /// Samples closer than the travel threshold to the last accepted
    /// mid-point are dropped unless `force` is set. Returns the dirty
    /// region of this call: the tip discs of every mid-point that received
    /// vertices, which contains all of those vertices.
    pub fn extrude(
        &mut self,
        point: Vec2,
        time: InputTimeS,
        force: bool,
        simplify: bool,
    ) -> Option<Rect> {
        profile_function!();
        assert!(!self.end_cap_built, "cannot extrude a line whose end cap is built");

        let prev = self.last_point();
        let threshold = self.min_screen_travel_threshold;
        let too_close = prev.is_some_and(|p| (point - p.screen_position).norm() < threshold);
        if too_close && !force {
            log::trace!("dropped sample at {point} below travel threshold");
            return None;
        }

        let radius = self.tip_size.radius_at(self.stylus_state.pressure);
        let direction =
            prev.and_then(|p| try_normalize2(point - p.screen_position).or(p.direction));
        let pt = MidPoint {
            screen_position: point,
            time,
            stylus: self.stylus_state,
            radius,
            direction,
            previous_radius: prev.map_or(radius, |p| p.radius),
        };
        self.pts.push(pt);

        let (Some(prev), Some(dir)) = (prev, direction) else {
            return None;
        };

        let mut bounds = None;
        if self.has_outline() {
            if let Some(dir_in) = prev.direction {
                let turn = self.tip_model.turn_points(
                    prev.screen_position,
                    prev.radius,
                    dir_in,
                    dir,
                    self.turn_verts,
                );
                let stamp = VertexStamp::of(&prev);
                for p in turn.points {
                    let vert = self.make_vert(p, &stamp);
                    bounds = join_opt(bounds, Some(Rect::at_point(p)));
                    match turn.side {
                        Some(Side::Forward) => self.fwd.push(vert),
                        Some(Side::Backward) | None => self.back.push(vert),
                    }
                }
            }
        } else {
            // The first segment fixes the direction of the first mid-point.
            if let Some(first) = self.pts.iter_mut().rev().nth(1) {
                first.direction = Some(dir);
            }
            let start = MidPoint {
                direction: Some(dir),
                ..prev
            };
            bounds = join_opt(bounds, self.push_start_cap(&start, dir));
            bounds = join_opt(bounds, self.push_offsets(&start, dir));
        }
        bounds = join_opt(bounds, self.push_offsets(&pt, dir));
        bounds = join_opt(bounds, Some(tip_disc(&prev)));
        bounds = join_opt(bounds, Some(tip_disc(&pt)));

        if simplify {
            self.simplify(self.simplify_window, self.simplify_threshold);
        }
        quill_core::profile_plot!("stroke outline vertices", self.fwd.len() + self.back.len());
        bounds
    }

    /// Close the line with tip-shaped cap vertices at its last mid-point.
    ///
    /// A line with a single mid-point becomes a dot.
    pub fn build_end_cap(&mut self) -> Option<Rect> {
        assert!(!self.end_cap_built, "end cap already built");
        self.end_cap_built = true;

        let last = self.last_point()?;
        let dir = last.direction.unwrap_or_else(Vec2::x);
        let mut bounds = None;
        if !self.has_outline() {
            bounds = join_opt(bounds, self.push_start_cap(&last, dir));
            bounds = join_opt(bounds, self.push_offsets(&last, dir));
        }

        let stamp = VertexStamp::of(&last);
        let points = self
            .tip_model
            .end_cap(last.screen_position, last.radius, dir, self.turn_verts);
        for p in points {
            let vert = self.make_vert(p, &stamp);
            bounds = join_opt(bounds, Some(Rect::at_point(p)));
            self.end_cap.push(vert);
        }
        log::debug!("built end cap: {self}");
        join_opt(bounds, Some(tip_disc(&last)))
    }

    /// Continue the outline of `other`, which must precede this line.
    ///
    /// The start cap becomes the join edge `[other.back.last, other.fwd.last]`
    /// so the concatenated outline has no seam. Does nothing when `other`
    /// has no outline yet.
    pub fn set_start_cap_to_line_back(&mut self, other: &FatLine) -> Option<Rect> {
        assert!(
            self.fwd.is_empty()
                && self.back.is_empty()
                && self.start_cap.is_empty()
                && self.pts.is_empty(),
            "can only join onto an empty line"
        );
        let (Some(fwd), Some(back), Some(last)) =
            (other.fwd.last(), other.back.last(), other.last_point())
        else {
            return None;
        };
        self.start_cap = vec![*back, *fwd];
        self.join_point = Some(last);
        log::debug!("joined line at {}", last.screen_position);
        Rect::envelope([back.position, fwd.position])
    }

    /// Drop all geometry and mid-points, keeping the configuration.
    pub fn clear_vertices(&mut self) {
        self.fwd.clear();
        self.back.clear();
        self.start_cap.clear();
        self.end_cap.clear();
        self.pts.clear();
        self.join_point = None;
        self.end_cap_built = false;
    }

    /// Run tail simplification over the last `window` vertices of each side.
    ///
    /// The `threshold` bound holds for this call only: vertices it drops lie
    /// within `threshold` of the polyline it leaves. Repeated calls over
    /// sliding windows compare against already simplified vertices, so the
    /// deviation from the unsimplified outline can accumulate past it.
    pub fn simplify(&mut self, window: usize, threshold: f32) {
        let removed = simplify_tail(&mut self.fwd, window, threshold)
            + simplify_tail(&mut self.back, window, threshold);
        if removed > 0 {
            log::trace!("simplified {removed} outline vertices");
        }
    }

    pub fn forward_line(&self) -> &[Vertex] {
        &self.fwd
    }

    pub fn backward_line(&self) -> &[Vertex] {
        &self.back
    }

    pub fn start_cap(&self) -> &[Vertex] {
        &self.start_cap
    }

    pub fn end_cap(&self) -> &[Vertex] {
        &self.end_cap
    }

    pub fn mid_points(&self) -> &[MidPoint] {
        &self.pts
    }

    /// Whether [`build_end_cap`](Self::build_end_cap) has run.
    pub fn is_closed(&self) -> bool {
        self.end_cap_built
    }

    pub fn tip_type(&self) -> TipType {
        self.tip_model.tip_type()
    }

    /// Swap the tip model. Setting the current type keeps the model.
    pub fn set_tip_type(&mut self, tip_type: TipType) {
        if self.tip_model.tip_type() != tip_type {
            self.tip_model = TipModel::new(tip_type);
        }
    }

    pub fn turn_verts(&self) -> u32 {
        self.turn_verts
    }

    pub fn set_turn_verts(&mut self, turn_verts: u32) {
        self.turn_verts = turn_verts;
    }

    pub fn tip_size(&self) -> TipSize {
        self.tip_size
    }

    pub fn set_tip_size(&mut self, tip_size: TipSize) {
        self.tip_size = tip_size;
    }

    pub fn min_screen_travel_threshold(&self) -> f32 {
        self.min_screen_travel_threshold
    }

    pub fn set_min_screen_travel_threshold(&mut self, threshold: f32) {
        self.min_screen_travel_threshold = threshold;
    }

    pub fn stylus_state(&self) -> StylusState {
        self.stylus_state
    }

    /// Stylus state applied to subsequent samples.
    pub fn set_stylus_state(&mut self, stylus_state: StylusState) {
        self.stylus_state = stylus_state;
    }

    pub fn vert_callback(&self) -> Option<&VertAddFn> {
        self.on_add_vert.as_ref()
    }

    pub fn set_vert_callback(&mut self, callback: Option<VertAddFn>) {
        self.on_add_vert = callback;
    }

    fn last_point(&self) -> Option<MidPoint> {
        self.pts.last().or(self.join_point.as_ref()).copied()
    }

    /// Whether outline vertices have been emitted or a join edge exists.
    fn has_outline(&self) -> bool {
        !self.fwd.is_empty() || self.join_point.is_some()
    }

    fn make_vert(&self, position: Vec2, stamp: &VertexStamp) -> Vertex {
        let mut vert = Vertex::new(position);
        if let Some(callback) = &self.on_add_vert {
            callback(stamp, &mut vert);
        }
        vert
    }

    fn push_offsets(&mut self, pt: &MidPoint, dir: Vec2) -> Option<Rect> {
        let (f, b) = self.tip_model.offset_points(pt.screen_position, pt.radius, dir);
        let stamp = VertexStamp::of(pt);
        let (fv, bv) = (self.make_vert(f, &stamp), self.make_vert(b, &stamp));
        self.fwd.push(fv);
        self.back.push(bv);
        Rect::envelope([f, b])
    }

    fn push_start_cap(&mut self, pt: &MidPoint, dir: Vec2) -> Option<Rect> {
        let points = self
            .tip_model
            .start_cap(pt.screen_position, pt.radius, dir, self.turn_verts);
        let stamp = VertexStamp::of(pt);
        let verts: Vec<Vertex> = points.iter().map(|&p| self.make_vert(p, &stamp)).collect();
        self.start_cap.extend(verts);
        Rect::envelope(points)
    }
}

/// Square around the tip at `pt`, containing every point extruded there.
fn tip_disc(pt: &MidPoint) -> Rect {
    // Square and chisel corners reach out to radius * sqrt(2).
    Rect::at_point(pt.screen_position).inflate(pt.radius.max(0.0) * std::f32::consts::SQRT_2)
}

impl fmt::Debug for FatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatLine")
            .field("tip_model", &self.tip_model)
            .field("tip_size", &self.tip_size)
            .field("turn_verts", &self.turn_verts)
            .field("min_screen_travel_threshold", &self.min_screen_travel_threshold)
            .field("has_vert_callback", &self.on_add_vert.is_some())
            .field("forward", &self.fwd.len())
            .field("backward", &self.back.len())
            .field("start_cap", &self.start_cap.len())
            .field("end_cap", &self.end_cap.len())
            .field("mid_points", &self.pts.len())
            .finish()
    }
}

impl fmt::Display for FatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} line: {} mid-points, {} forward, {} backward, {}+{} cap verts",
            self.tip_type(),
            self.pts.len(),
            self.fwd.len(),
            self.back.len(),
            self.start_cap.len(),
            self.end_cap.len()
        )
    }
}
