//! # Quill Stroke
//!
//! Turns pointer input into stroke outlines and meshes.
//!
//! - [`FatLine`] - Incremental outline extruder, one per stroke segment
//! - [`TipModel`] - Pen tip silhouettes (round, square, chisel)
//! - [`build_line_mesh`] - Triangulates a chain of extruders into a
//!   [`Mesh`](quill_core::mesh::Mesh)
//!
//! ```
//! use quill_core::math::Vec2;
//! use quill_core::mesh::{OptimizedMesh, ShaderType};
//! use quill_stroke::{FatLine, FatLineConfig, build_line_mesh};
//!
//! let mut line = FatLine::new(FatLineConfig::new().with_radius(4.0));
//! for (t, x) in [0.0f32, 10.0, 20.0].into_iter().enumerate() {
//!     line.extrude(Vec2::new(x, x * 0.5), t as f64 * 0.016, false, true);
//! }
//! line.build_end_cap();
//!
//! let mesh = build_line_mesh(std::slice::from_ref(&line));
//! let packed = OptimizedMesh::new(ShaderType::SingleColor, &mesh);
//! assert_eq!(packed.index_size(), mesh.index_size());
//! ```

mod config;
mod fat_line;
mod mesh_builder;
mod mid_point;
mod outline;
pub mod simplify;
pub mod tip;

pub use config::FatLineConfig;
pub use fat_line::{FatLine, VertAddFn, VertexStamp};
pub use mesh_builder::build_line_mesh;
pub use mid_point::{InputTimeS, MidPoint, StylusState, TipSize};
pub use tip::{Side, TipModel, TipType, TurnPoints};
