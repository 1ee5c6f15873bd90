//! Packed, upload-ready meshes.

use crate::math::{Mat3, Vec2, Vec4};
use crate::profiling::{profile_function, profile_scope};
use crate::rect::Rect;

use super::data::Mesh;
use super::error::{MeshError, MeshResult};
use super::index::{IndexBuffer, IndexFormat};
use super::packing::{PackedVertList, VertFormat};
use super::vertex::TextureInfo;

/// The renderer's shader catalog, used here only to pick a packing format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShaderType {
    /// Every vertex drawn in the mesh's uniform color.
    SingleColor,
    /// Per-vertex color.
    Colored,
    /// Per-vertex color and texture coordinates.
    Textured,
    /// Eraser geometry; only coverage matters.
    Erase,
}

impl ShaderType {
    /// The packing format for this shader.
    pub fn vert_format(&self) -> VertFormat {
        match self {
            Self::SingleColor | Self::Erase => VertFormat::X12Y12,
            Self::Colored => VertFormat::X11A7R6Y11G7B6,
            Self::Textured => VertFormat::X11A7R6Y11G7B6U12V12,
        }
    }
}

/// A quantized mesh with minimal-width indices.
///
/// Positions live in packed space; `object_matrix` maps packed space to
/// world space. Geometry is immutable once built, except for
/// [`clear_cpu_memory_verts`](Self::clear_cpu_memory_verts), after which
/// CPU-side geometry queries return [`MeshError::CpuDataReleased`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedMesh {
    shader_type: ShaderType,
    verts: PackedVertList,
    idx: IndexBuffer,
    /// Index count, kept after the CPU copy is released.
    index_count: usize,
    /// Bounds of the packed positions, in packed space.
    mbr: Rect,
    /// Packed coordinates to world coordinates.
    pub object_matrix: Mat3,
    /// Uniform color, taken from the first source vertex.
    pub color: Vec4,
    pub mul_color_modifier: Vec4,
    pub add_color_modifier: Vec4,
    pub texture: Option<TextureInfo>,
}

impl OptimizedMesh {
    /// Pack `mesh` using its own vertex envelope.
    pub fn new(shader_type: ShaderType, mesh: &Mesh) -> Self {
        let Some(envelope) = mesh.envelope() else {
            panic!("cannot pack a mesh without vertices");
        };
        Self::with_envelope(shader_type, mesh, envelope)
    }

    /// Pack `mesh`, quantizing over a caller-supplied `envelope` that must
    /// contain every vertex. Sharing one envelope across meshes keeps their
    /// quantization grids aligned.
    pub fn with_envelope(shader_type: ShaderType, mesh: &Mesh, envelope: Rect) -> Self {
        profile_function!();
        assert!(
            !mesh.idx.is_empty() && mesh.idx.len() % 3 == 0,
            "packed meshes need a non-empty triangle index list, got {} indices",
            mesh.idx.len()
        );
        assert!(!mesh.verts.is_empty(), "cannot pack a mesh without vertices");
        if let Some(mesh_envelope) = mesh.envelope() {
            assert!(
                envelope.contains(&mesh_envelope),
                "packing envelope {envelope:?} does not contain the mesh bounds {mesh_envelope:?}"
            );
        }

        let format = shader_type.vert_format();
        // Mesh coordinates to packed coordinates.
        let m = PackedVertList::calc_transform_for_format(&envelope, format);
        let verts = PackedVertList::pack_verts(&mesh.verts, &m, format);

        let mut idx = IndexBuffer::for_vertex_count(&mesh.idx, mesh.verts.len());
        {
            profile_scope!("normalize_packed_winding");
            idx.normalize_triangles(|i| verts.unpack_position(i as usize));
        }

        let mbr = Rect::envelope((0..verts.len()).map(|i| verts.unpack_position(i)))
            .unwrap_or_else(|| Rect::at_point(Vec2::zeros()));
        let Some(packed_to_mesh) = m.try_inverse() else {
            panic!("packing transform for {envelope:?} is not invertible");
        };

        log::debug!(
            "packed {} vertices as {:?} with {:?} indices",
            verts.len(),
            format,
            idx.format()
        );

        let result = Self {
            shader_type,
            verts,
            index_count: idx.len(),
            idx,
            mbr,
            object_matrix: mesh.object_matrix * packed_to_mesh,
            color: mesh.verts[0].color,
            mul_color_modifier: Vec4::new(1.0, 1.0, 1.0, 1.0),
            add_color_modifier: Vec4::zeros(),
            texture: mesh.texture.clone(),
        };
        result.validate();
        result
    }

    pub fn shader_type(&self) -> ShaderType {
        self.shader_type
    }

    pub fn vert_format(&self) -> VertFormat {
        self.verts.format()
    }

    pub fn packed_verts(&self) -> MeshResult<&PackedVertList> {
        self.ensure_cpu_data()?;
        Ok(&self.verts)
    }

    /// Whether CPU-side geometry is still available.
    pub fn has_cpu_data(&self) -> bool {
        !self.verts.is_empty()
    }

    /// Drop CPU-side vertices and indices once they live on the GPU.
    /// Type, transform, colors, texture, index width and index count are
    /// kept for drawing.
    pub fn clear_cpu_memory_verts(&mut self) {
        self.idx.clear();
        self.verts.clear();
    }

    /// Unpack into a raw mesh, applying the color modifiers.
    pub fn to_mesh(&self) -> MeshResult<Mesh> {
        self.ensure_cpu_data()?;
        let verts = (0..self.verts.len())
            .map(|i| {
                let mut v = self.verts.unpack_vertex(i);
                if self.shader_type == ShaderType::SingleColor {
                    v.color = self.color;
                }
                v.color = v.color.component_mul(&self.mul_color_modifier) + self.add_color_modifier;
                v
            })
            .collect();

        let mut mesh = Mesh::from_verts(verts)
            .with_indices(self.idx.to_u32_vec())
            .with_object_matrix(self.object_matrix);
        mesh.texture = self.texture.clone();
        Ok(mesh)
    }

    pub fn index_format(&self) -> IndexFormat {
        self.idx.format()
    }

    /// Number of indices. Still valid after the CPU copy is released.
    pub fn index_size(&self) -> usize {
        self.index_count
    }

    /// Index `n`, widened. Panics when out of range.
    pub fn index_at(&self, n: usize) -> MeshResult<u32> {
        self.ensure_cpu_data()?;
        Ok(self.idx.at(n))
    }

    /// The 16-bit indices; fails when the mesh needed 32-bit indices.
    pub fn index16(&self) -> MeshResult<&[u16]> {
        self.ensure_cpu_data()?;
        self.idx.as_u16().ok_or(MeshError::IndexOverflow {
            vertex_count: self.verts.len(),
        })
    }

    pub fn vertex_bytes(&self) -> MeshResult<&[u8]> {
        self.ensure_cpu_data()?;
        Ok(self.verts.as_bytes())
    }

    pub fn index_bytes(&self) -> MeshResult<&[u8]> {
        self.ensure_cpu_data()?;
        Ok(self.idx.as_bytes())
    }

    /// Bounds of the packed positions, in packed space.
    pub fn mbr(&self) -> Rect {
        self.mbr
    }

    /// Bounds of the packed positions, in world space.
    pub fn world_bounds(&self) -> Rect {
        self.mbr.transform(&self.object_matrix)
    }

    fn ensure_cpu_data(&self) -> MeshResult<()> {
        if self.has_cpu_data() {
            Ok(())
        } else {
            Err(MeshError::CpuDataReleased)
        }
    }

    fn validate(&self) {
        if self.idx.is_empty() {
            return;
        }
        assert!(
            self.idx.len() % 3 == 0,
            "packed index count {} is not a multiple of 3",
            self.idx.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{mat3_from_translation, signed_area};
    use crate::mesh::vertex::Vertex;

    fn fan_mesh(n: usize) -> Mesh {
        // A wobbly fan around the origin, including clockwise triangles.
        let mut verts = vec![Vertex::new(Vec2::zeros()).with_color(Vec4::new(0.2, 0.4, 0.6, 1.0))];
        for i in 0..n {
            let angle = i as f32 * 0.37;
            let r = 10.0 + (i % 7) as f32 * 3.3;
            verts.push(
                Vertex::new(Vec2::new(angle.cos() * r, angle.sin() * r))
                    .with_color(Vec4::new(0.1 * (i % 10) as f32, 0.5, 1.0, 1.0)),
            );
        }
        let mut idx = Vec::new();
        for i in 1..n as u32 {
            if i % 2 == 0 {
                idx.extend([0, i, i + 1]);
            } else {
                idx.extend([0, i + 1, i]);
            }
        }
        Mesh::from_verts(verts)
            .with_indices(idx)
            .with_object_matrix(mat3_from_translation(Vec2::new(100.0, -40.0)))
    }

    #[test]
    fn shader_formats() {
        assert_eq!(ShaderType::SingleColor.vert_format(), VertFormat::X12Y12);
        assert_eq!(ShaderType::Erase.vert_format(), VertFormat::X12Y12);
        assert_eq!(ShaderType::Colored.vert_format(), VertFormat::X11A7R6Y11G7B6);
        assert_eq!(
            ShaderType::Textured.vert_format(),
            VertFormat::X11A7R6Y11G7B6U12V12
        );
    }

    #[test]
    fn round_trip_within_one_quantization_step() {
        let mesh = fan_mesh(40);
        let packed = OptimizedMesh::new(ShaderType::Colored, &mesh);
        let unpacked = packed.to_mesh().unwrap();

        assert_eq!(unpacked.verts.len(), mesh.verts.len());
        assert_eq!(unpacked.index_size(), mesh.index_size());
        assert_eq!(unpacked.index_size() % 3, 0);

        let env = mesh.envelope().unwrap();
        let max = VertFormat::X11A7R6Y11G7B6.position_max() as f32;
        let step = Vec2::new(env.width() / max, env.height() / max);
        for (orig, out) in mesh.verts.iter().zip(&unpacked.verts) {
            let expected = mesh.object_pos_to_world(orig.position);
            let actual = unpacked.object_pos_to_world(out.position);
            assert!((expected.x - actual.x).abs() <= step.x, "{expected} vs {actual}");
            assert!((expected.y - actual.y).abs() <= step.y, "{expected} vs {actual}");
        }
    }

    #[test]
    fn packed_winding_is_non_negative() {
        let mesh = fan_mesh(60);
        let packed = OptimizedMesh::new(ShaderType::SingleColor, &mesh);
        let verts = packed.packed_verts().unwrap();
        for t in 0..packed.index_size() / 3 {
            let p = |k: usize| verts.unpack_position(packed.index_at(3 * t + k).unwrap() as usize);
            assert!(signed_area(p(0), p(1), p(2)) >= 0.0, "triangle {t}");
        }
    }

    #[test]
    fn quantization_flip_is_corrected() {
        // Counter-clockwise in float space, clockwise once y is rounded.
        let verts = vec![
            Vertex::new(Vec2::new(0.0, 0.0)),
            Vertex::new(Vec2::new(10.0, 0.6)),
            Vertex::new(Vec2::new(5.0, 0.4)),
            Vertex::new(Vec2::new(4095.0, 4095.0)),
        ];
        let mut mesh = Mesh::from_verts(verts).with_indices(vec![0, 1, 2]);
        mesh.normalize_triangle_orientation();
        assert_eq!(mesh.idx, vec![0, 1, 2]);

        let packed = OptimizedMesh::new(ShaderType::SingleColor, &mesh);
        assert_eq!(packed.index16().unwrap(), &[0, 2, 1]);
    }

    #[test]
    fn index_width_boundary() {
        let make = |n: usize| {
            let verts = (0..n)
                .map(|i| Vertex::new(Vec2::new((i % 256) as f32, (i / 256) as f32)))
                .collect();
            Mesh::from_verts(verts).with_indices(vec![0, 1, n as u32 - 1])
        };

        let small = OptimizedMesh::new(ShaderType::SingleColor, &make(65535));
        assert_eq!(small.index_format(), IndexFormat::Uint16);
        assert!(small.index16().is_ok());

        let big = OptimizedMesh::new(ShaderType::SingleColor, &make(65536));
        assert_eq!(big.index_format(), IndexFormat::Uint32);
        assert_eq!(big.index_at(2), Ok(65535));
        assert_eq!(
            big.index16(),
            Err(MeshError::IndexOverflow {
                vertex_count: 65536
            })
        );
    }

    #[test]
    fn single_color_override_and_modifiers() {
        let mut packed = OptimizedMesh::new(ShaderType::SingleColor, &fan_mesh(5));
        packed.mul_color_modifier = Vec4::new(0.5, 0.5, 0.5, 1.0);
        packed.add_color_modifier = Vec4::new(0.1, 0.0, 0.0, 0.0);
        let mesh = packed.to_mesh().unwrap();
        for v in &mesh.verts {
            assert!((v.color - Vec4::new(0.2, 0.2, 0.3, 1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn world_bounds_match_source() {
        let mesh = fan_mesh(30);
        let packed = OptimizedMesh::new(ShaderType::Textured, &mesh);
        let expected = mesh.envelope().unwrap().transform(&mesh.object_matrix);
        let actual = packed.world_bounds();
        assert!((expected.from - actual.from).norm() < 0.1);
        assert!((expected.to - actual.to).norm() < 0.1);
    }

    #[test]
    fn clear_cpu_memory_keeps_metadata() {
        let mesh = fan_mesh(10).with_texture(TextureInfo::new("brush"));
        let mut packed = OptimizedMesh::new(ShaderType::Textured, &mesh);
        let matrix = packed.object_matrix;
        packed.clear_cpu_memory_verts();

        assert!(!packed.has_cpu_data());
        assert_eq!(packed.shader_type(), ShaderType::Textured);
        assert_eq!(packed.object_matrix, matrix);
        assert_eq!(packed.texture, Some(TextureInfo::new("brush")));
        assert_eq!(packed.color, Vec4::new(0.2, 0.4, 0.6, 1.0));
        assert_eq!(packed.to_mesh(), Err(MeshError::CpuDataReleased));
        assert_eq!(packed.index16(), Err(MeshError::CpuDataReleased));
        assert!(packed.vertex_bytes().is_err());
    }

    #[test]
    fn released_mesh_keeps_draw_metadata() {
        let mut packed = OptimizedMesh::new(ShaderType::Colored, &fan_mesh(10));
        let index_count = packed.index_size();
        packed.clear_cpu_memory_verts();

        assert_eq!(packed.index_size(), index_count);
        assert_eq!(packed.index_format(), IndexFormat::Uint16);
        assert_eq!(packed.index_at(0), Err(MeshError::CpuDataReleased));
        assert_eq!(packed.packed_verts().err(), Some(MeshError::CpuDataReleased));
        assert!(packed.index_bytes().is_err());
    }

    #[test]
    #[should_panic(expected = "triangle index list")]
    fn rejects_non_triangle_indices() {
        let mesh = fan_mesh(5).with_indices(vec![0, 1]);
        OptimizedMesh::new(ShaderType::Colored, &mesh);
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn rejects_small_envelope() {
        let mesh = fan_mesh(5);
        let envelope = Rect::new(Vec2::zeros(), Vec2::new(1.0, 1.0));
        OptimizedMesh::with_envelope(ShaderType::Colored, &mesh, envelope);
    }
}
