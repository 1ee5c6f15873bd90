//! CPU-side mesh types.
//!
//! This module provides the geometry intermediate forms of the stroke
//! pipeline:
//!
//! - [`Vertex`] - Float vertex with color, texture and shader data
//! - [`Mesh`] - Raw mesh with 32-bit indices and an object matrix
//! - [`OptimizedMesh`] - Quantized mesh with minimal-width indices
//! - [`PackedVertList`] / [`VertFormat`] - Fixed-point vertex layouts
//!
//! Recoverable failures are reported as [`MeshError`]; broken invariants
//! (non-triangle index counts, out-of-range indices) panic.

mod data;
mod error;
mod index;
mod optimized;
mod packing;
mod vertex;

pub use data::Mesh;
pub use error::{MeshError, MeshResult};
pub use index::{IndexBuffer, IndexFormat, MAX_16BIT_VERTICES, normalize_triangles};
pub use optimized::{OptimizedMesh, ShaderType};
pub use packing::{PACKED_WORD_BITS, PackedVertList, VertFormat};
pub use vertex::{FrameTimeS, ShaderFlags, ShaderMetadata, TextureInfo, Vertex};
