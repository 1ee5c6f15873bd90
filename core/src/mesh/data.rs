//! The raw, untransformed mesh.
//!
//! [`Mesh`] is the generic intermediate form: float vertices, 32-bit
//! indices and an object matrix. Stroke geometry is assembled into one,
//! then packed into an [`OptimizedMesh`](super::OptimizedMesh).

use crate::math::{Mat3, Vec2, transform_point2};
use crate::rect::Rect;

use super::error::{MeshError, MeshResult};
use super::index::{IndexFormat, MAX_16BIT_VERTICES, normalize_triangles};
use super::vertex::{ShaderMetadata, TextureInfo, Vertex};

/// A CPU-side mesh of float vertices.
///
/// When `idx` is non-empty it holds triangle indices into `verts`; an empty
/// `idx` means `verts` is a flat triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub verts: Vec<Vertex>,
    pub idx: Vec<u32>,
    /// Object coordinates to world coordinates.
    pub object_matrix: Mat3,
    pub texture: Option<TextureInfo>,
    pub shader_metadata: ShaderMetadata,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            verts: Vec::new(),
            idx: Vec::new(),
            object_matrix: Mat3::identity(),
            texture: None,
            shader_metadata: ShaderMetadata::default(),
        }
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// A non-indexed mesh with an identity object matrix.
    pub fn from_verts(verts: Vec<Vertex>) -> Self {
        Self {
            verts,
            ..Self::default()
        }
    }

    /// Set the triangle indices.
    pub fn with_indices(mut self, idx: Vec<u32>) -> Self {
        self.idx = idx;
        self
    }

    /// Set the object matrix.
    pub fn with_object_matrix(mut self, object_matrix: Mat3) -> Self {
        self.object_matrix = object_matrix;
        self
    }

    /// Set the texture.
    pub fn with_texture(mut self, texture: TextureInfo) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Set the shader metadata.
    pub fn with_shader_metadata(mut self, shader_metadata: ShaderMetadata) -> Self {
        self.shader_metadata = shader_metadata;
        self
    }

    /// Drop all geometry, keeping the transform, texture and metadata.
    pub fn clear(&mut self) {
        self.verts.clear();
        self.idx.clear();
    }

    /// Append a copy of `other`, re-expressed in this mesh's object space.
    ///
    /// Both meshes must agree on being indexed unless one of them has no
    /// vertices yet.
    pub fn append(&mut self, other: &Mesh) {
        assert!(
            other.verts.is_empty()
                || self.verts.is_empty()
                || other.idx.is_empty() == self.idx.is_empty(),
            "cannot append an indexed mesh to a non-indexed one (or vice versa)"
        );
        let Some(inverse) = self.object_matrix.try_inverse() else {
            panic!("mesh object matrix is not invertible");
        };
        let to_self = inverse * other.object_matrix;

        let start = self.verts.len() as u32;
        self.verts.extend(other.verts.iter().map(|v| Vertex {
            position: transform_point2(&to_self, v.position),
            ..*v
        }));
        self.idx.extend(other.idx.iter().map(|&i| i + start));
    }

    /// Expand the index list into a flat, duplicated vertex list.
    pub fn deindex(&mut self) {
        if self.idx.is_empty() {
            return;
        }
        let new_verts = self.idx.iter().map(|&i| self.verts[i as usize]).collect();
        self.idx.clear();
        self.verts = new_verts;
    }

    /// Replace the index list with `0..vertex_count`.
    pub fn gen_index(&mut self) {
        self.idx = (0..self.verts.len() as u32).collect();
    }

    /// Swap the last two indices of every clockwise triangle.
    pub fn normalize_triangle_orientation(&mut self) {
        let verts = &self.verts;
        normalize_triangles(|i: u32| verts[i as usize].position, &mut self.idx);
    }

    pub fn object_pos_to_world(&self, object_pos: Vec2) -> Vec2 {
        transform_point2(&self.object_matrix, object_pos)
    }

    /// Whether every vertex is addressable by a 16-bit index.
    pub fn has_16bit_index(&self) -> bool {
        self.verts.len() <= MAX_16BIT_VERTICES
    }

    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::for_vertex_count(self.verts.len())
    }

    /// The indices narrowed to 16 bits, refusing rather than truncating.
    pub fn index16(&self) -> MeshResult<Vec<u16>> {
        if !self.has_16bit_index() {
            log::error!("mesh with {} vertices overflows 16-bit indices", self.verts.len());
            return Err(MeshError::IndexOverflow {
                vertex_count: self.verts.len(),
            });
        }
        Ok(self.idx.iter().map(|&i| i as u16).collect())
    }

    pub fn index_size(&self) -> usize {
        self.idx.len()
    }

    pub fn index_at(&self, n: usize) -> u32 {
        self.idx[n]
    }

    /// Object-space bounds of all vertices.
    pub fn envelope(&self) -> Option<Rect> {
        Rect::envelope(self.verts.iter().map(|v| v.position))
    }
}
