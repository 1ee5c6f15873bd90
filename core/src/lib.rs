//! # Quill Core
//!
//! Geometry shared by the stroke pipeline: math aliases, rectangles,
//! raw meshes and their packed, upload-ready form.

pub mod math;
pub mod mesh;
pub mod profiling;
pub mod rect;

pub use rect::Rect;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
