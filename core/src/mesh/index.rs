//! Index formats and the dual-width index buffer.
//!
//! This module provides:
//! - [`IndexFormat`] - Index data format (u16 or u32)
//! - [`IndexBuffer`] - Owned indices stored at one of the two widths
//! - [`normalize_triangles`] - Winding fix-up shared by raw and packed meshes

use crate::math::{Vec2, signed_area};

/// Largest vertex count whose indices are stored in 16 bits.
pub const MAX_16BIT_VERTICES: usize = u16::MAX as usize;

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (at most 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    /// The narrowest format able to address `vertex_count` vertices.
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count <= MAX_16BIT_VERTICES {
            Self::Uint16
        } else {
            Self::Uint32
        }
    }
}

/// Triangle indices at their minimal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Default for IndexBuffer {
    fn default() -> Self {
        Self::U16(Vec::new())
    }
}

impl IndexBuffer {
    /// Store `indices` at the narrowest width that fits `vertex_count`.
    ///
    /// Panics if an index does not address one of the `vertex_count` vertices.
    pub fn for_vertex_count(indices: &[u32], vertex_count: usize) -> Self {
        assert!(
            indices.iter().all(|&i| (i as usize) < vertex_count),
            "index out of range for {vertex_count} vertices"
        );
        match IndexFormat::for_vertex_count(vertex_count) {
            IndexFormat::Uint16 => Self::U16(indices.iter().map(|&i| i as u16).collect()),
            IndexFormat::Uint32 => Self::U32(indices.to_vec()),
        }
    }

    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the indices, keeping the width.
    pub fn clear(&mut self) {
        match self {
            Self::U16(v) => v.clear(),
            Self::U32(v) => v.clear(),
        }
    }

    /// Index `n`, widened. Panics when out of range.
    pub fn at(&self, n: usize) -> u32 {
        match self {
            Self::U16(v) => u32::from(v[n]),
            Self::U32(v) => v[n],
        }
    }

    pub fn to_u32_vec(&self) -> Vec<u32> {
        match self {
            Self::U16(v) => v.iter().map(|&i| u32::from(i)).collect(),
            Self::U32(v) => v.clone(),
        }
    }

    /// The 16-bit view, or `None` if indices are stored at 32 bits.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Self::U16(v) => Some(v),
            Self::U32(_) => None,
        }
    }

    /// Raw bytes for upload, in native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
        }
    }

    /// Re-run [`normalize_triangles`] on whichever width is stored.
    pub fn normalize_triangles(&mut self, position_of: impl Fn(u32) -> Vec2) {
        match self {
            Self::U16(v) => normalize_triangles(|i: u16| position_of(u32::from(i)), v),
            Self::U32(v) => normalize_triangles(position_of, v),
        }
    }
}

/// Make every triangle wind counter-clockwise (non-negative signed area).
///
/// `position_of` decides which positions the check runs against: packed
/// meshes pass their quantized positions, since rounding can flip a thin
/// triangle that was counter-clockwise in float space.
pub fn normalize_triangles<I: Copy>(position_of: impl Fn(I) -> Vec2, indices: &mut [I]) {
    assert!(
        indices.len() % 3 == 0,
        "triangle index count {} is not a multiple of 3",
        indices.len()
    );
    for tri in indices.chunks_exact_mut(3) {
        let area = signed_area(position_of(tri[0]), position_of(tri[1]), position_of(tri[2]));
        if area < 0.0 {
            tri.swap(1, 2);
        }
    }
}
