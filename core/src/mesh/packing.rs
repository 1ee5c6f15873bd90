//! Fixed-point vertex packing.
//!
//! Every packed vertex is a run of `u32` words, each carrying at most
//! [`PACKED_WORD_BITS`] significant bits so the shader can read a word as an
//! exact float. Positions are quantized onto an integer grid by a transform
//! derived from the mesh's bounding rectangle; colors and texture
//! coordinates are quantized from `0..=1`.
//!
//! | Format                    | Words | Layout                                  |
//! |---------------------------|-------|-----------------------------------------|
//! | `X12Y12`                  | 1     | `x:12 y:12`                             |
//! | `X11A7R6Y11G7B6`          | 2     | `x:11 a:7 r:6`, `y:11 g:7 b:6`          |
//! | `X11A7R6Y11G7B6U12V12`    | 3     | as above, then `u:12 v:12`              |

use static_assertions::{const_assert, const_assert_eq};

use crate::math::{Mat3, Vec2, Vec4, mat3_from_scale_translation, transform_point2};
use crate::rect::Rect;

use super::vertex::Vertex;

/// Significant bits per packed word.
pub const PACKED_WORD_BITS: u32 = 24;

const POS12_BITS: u32 = 12;
const POS11_BITS: u32 = 11;
/// Alpha and green.
const WIDE_CHANNEL_BITS: u32 = 7;
/// Red and blue.
const NARROW_CHANNEL_BITS: u32 = 6;
const UV_BITS: u32 = 12;

const_assert!(PACKED_WORD_BITS <= f32::MANTISSA_DIGITS);
const_assert_eq!(POS12_BITS * 2, PACKED_WORD_BITS);
const_assert_eq!(POS11_BITS + WIDE_CHANNEL_BITS + NARROW_CHANNEL_BITS, PACKED_WORD_BITS);
const_assert_eq!(UV_BITS * 2, PACKED_WORD_BITS);

const fn max_value(bits: u32) -> u32 {
    (1 << bits) - 1
}

/// Packed vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertFormat {
    /// Position only.
    X12Y12,
    /// Position and color.
    X11A7R6Y11G7B6,
    /// Position, color and texture coordinates.
    X11A7R6Y11G7B6U12V12,
}

impl VertFormat {
    /// Number of `u32` words per vertex.
    pub fn words_per_vertex(&self) -> usize {
        match self {
            Self::X12Y12 => 1,
            Self::X11A7R6Y11G7B6 => 2,
            Self::X11A7R6Y11G7B6U12V12 => 3,
        }
    }

    /// Size in bytes of one packed vertex.
    pub fn stride(&self) -> usize {
        self.words_per_vertex() * std::mem::size_of::<u32>()
    }

    /// Bits per position axis.
    pub fn position_bits(&self) -> u32 {
        match self {
            Self::X12Y12 => POS12_BITS,
            Self::X11A7R6Y11G7B6 | Self::X11A7R6Y11G7B6U12V12 => POS11_BITS,
        }
    }

    /// Largest representable quantized coordinate, `2^bits - 1`.
    pub fn position_max(&self) -> u32 {
        max_value(self.position_bits())
    }

    pub fn has_color(&self) -> bool {
        !matches!(self, Self::X12Y12)
    }

    pub fn has_texture_coords(&self) -> bool {
        matches!(self, Self::X11A7R6Y11G7B6U12V12)
    }
}

fn quantize(value: f32, max: u32) -> u32 {
    value.round().clamp(0.0, max as f32) as u32
}

fn quantize_unit(value: f32, bits: u32) -> u32 {
    let max = max_value(bits);
    quantize(value.clamp(0.0, 1.0) * max as f32, max)
}

fn dequantize_unit(value: u32, bits: u32) -> f32 {
    value as f32 / max_value(bits) as f32
}

fn field(word: u32, shift: u32, bits: u32) -> u32 {
    (word >> shift) & max_value(bits)
}

/// A packed vertex buffer in one [`VertFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedVertList {
    format: VertFormat,
    words: Vec<u32>,
}

impl PackedVertList {
    /// An empty list.
    pub fn new(format: VertFormat) -> Self {
        Self {
            format,
            words: Vec::new(),
        }
    }

    /// Transform mapping `envelope` onto the format's integer grid
    /// `[0, 2^bits - 1]` on each axis. A zero-extent axis keeps unit scale.
    pub fn calc_transform_for_format(envelope: &Rect, format: VertFormat) -> Mat3 {
        let max = format.position_max() as f32;
        let axis_scale = |extent: f32| if extent > 0.0 { max / extent } else { 1.0 };
        let scale = Vec2::new(axis_scale(envelope.width()), axis_scale(envelope.height()));
        mat3_from_scale_translation(scale, -envelope.from.component_mul(&scale))
    }

    /// Pack `verts`, mapping positions through `transform` first.
    pub fn pack_verts(verts: &[Vertex], transform: &Mat3, format: VertFormat) -> Self {
        let mut list = Self {
            format,
            words: Vec::with_capacity(verts.len() * format.words_per_vertex()),
        };
        for v in verts {
            list.push(v, transform);
        }
        list
    }

    fn push(&mut self, v: &Vertex, transform: &Mat3) {
        let p = transform_point2(transform, v.position);
        let max = self.format.position_max();
        let (x, y) = (quantize(p.x, max), quantize(p.y, max));

        if self.format == VertFormat::X12Y12 {
            self.words.push(x << POS12_BITS | y);
            return;
        }

        let [r, g, b, a] = [v.color.x, v.color.y, v.color.z, v.color.w];
        let (a, g) = (
            quantize_unit(a, WIDE_CHANNEL_BITS),
            quantize_unit(g, WIDE_CHANNEL_BITS),
        );
        let (r, b) = (
            quantize_unit(r, NARROW_CHANNEL_BITS),
            quantize_unit(b, NARROW_CHANNEL_BITS),
        );
        let color_shift = WIDE_CHANNEL_BITS + NARROW_CHANNEL_BITS;
        self.words.push(x << color_shift | a << NARROW_CHANNEL_BITS | r);
        self.words.push(y << color_shift | g << NARROW_CHANNEL_BITS | b);

        if self.format.has_texture_coords() {
            let u = quantize_unit(v.texture_coords.x, UV_BITS);
            let v = quantize_unit(v.texture_coords.y, UV_BITS);
            self.words.push(u << UV_BITS | v);
        }
    }

    fn vertex_words(&self, i: usize) -> &[u32] {
        let n = self.format.words_per_vertex();
        &self.words[i * n..(i + 1) * n]
    }

    /// Quantized position of vertex `i` in packed space.
    pub fn unpack_position(&self, i: usize) -> Vec2 {
        let words = self.vertex_words(i);
        match self.format {
            VertFormat::X12Y12 => Vec2::new(
                field(words[0], POS12_BITS, POS12_BITS) as f32,
                field(words[0], 0, POS12_BITS) as f32,
            ),
            VertFormat::X11A7R6Y11G7B6 | VertFormat::X11A7R6Y11G7B6U12V12 => {
                let shift = WIDE_CHANNEL_BITS + NARROW_CHANNEL_BITS;
                Vec2::new(
                    field(words[0], shift, POS11_BITS) as f32,
                    field(words[1], shift, POS11_BITS) as f32,
                )
            }
        }
    }

    /// Vertex `i` with packed-space position and whatever attributes the
    /// format carries; missing attributes keep [`Vertex::new`] defaults.
    pub fn unpack_vertex(&self, i: usize) -> Vertex {
        let mut vertex = Vertex::new(self.unpack_position(i));
        if !self.format.has_color() {
            return vertex;
        }

        let words = self.vertex_words(i);
        let wide = |w: u32| {
            dequantize_unit(field(w, NARROW_CHANNEL_BITS, WIDE_CHANNEL_BITS), WIDE_CHANNEL_BITS)
        };
        let narrow =
            |w: u32| dequantize_unit(field(w, 0, NARROW_CHANNEL_BITS), NARROW_CHANNEL_BITS);
        vertex.color =
            Vec4::new(narrow(words[0]), wide(words[1]), narrow(words[1]), wide(words[0]));

        if self.format.has_texture_coords() {
            vertex.texture_coords = Vec2::new(
                dequantize_unit(field(words[2], UV_BITS, UV_BITS), UV_BITS),
                dequantize_unit(field(words[2], 0, UV_BITS), UV_BITS),
            );
        }
        vertex
    }

    pub fn format(&self) -> VertFormat {
        self.format
    }

    /// Number of packed vertices.
    pub fn len(&self) -> usize {
        self.words.len() / self.format.words_per_vertex()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Release the packed words, keeping the format.
    pub fn clear(&mut self) {
        self.words = Vec::new();
    }

    pub fn as_words(&self) -> &[u32] {
        &self.words
    }

    /// Raw bytes for upload, in native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_envelope(format: VertFormat) -> Rect {
        let max = format.position_max() as f32;
        Rect::new(Vec2::zeros(), Vec2::new(max, max))
    }

    #[test]
    fn format_sizes() {
        assert_eq!(VertFormat::X12Y12.stride(), 4);
        assert_eq!(VertFormat::X11A7R6Y11G7B6.stride(), 8);
        assert_eq!(VertFormat::X11A7R6Y11G7B6U12V12.stride(), 12);
        assert_eq!(VertFormat::X12Y12.position_max(), 4095);
        assert_eq!(VertFormat::X11A7R6Y11G7B6.position_max(), 2047);
    }

    #[test]
    fn transform_maps_envelope_onto_grid() {
        let env = Rect::new(Vec2::new(-10.0, 5.0), Vec2::new(10.0, 25.0));
        let m = PackedVertList::calc_transform_for_format(&env, VertFormat::X12Y12);
        assert!(transform_point2(&m, env.from).norm() < 1e-3);
        assert!((transform_point2(&m, env.to) - Vec2::new(4095.0, 4095.0)).norm() < 1e-2);
    }

    #[test]
    fn degenerate_envelope_keeps_unit_scale() {
        let env = Rect::new(Vec2::new(3.0, 1.0), Vec2::new(3.0, 9.0));
        let m = PackedVertList::calc_transform_for_format(&env, VertFormat::X12Y12);
        let p = transform_point2(&m, Vec2::new(3.0, 9.0));
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 4095.0).abs() < 1e-2);
    }

    #[test]
    fn grid_positions_survive_exactly() {
        for format in [
            VertFormat::X12Y12,
            VertFormat::X11A7R6Y11G7B6,
            VertFormat::X11A7R6Y11G7B6U12V12,
        ] {
            let env = grid_envelope(format);
            let max = format.position_max() as f32;
            let verts = [
                Vertex::new(Vec2::new(0.0, 0.0)),
                Vertex::new(Vec2::new(max, 17.0)),
                Vertex::new(Vec2::new(1.0, max)),
            ];
            let m = PackedVertList::calc_transform_for_format(&env, format);
            let list = PackedVertList::pack_verts(&verts, &m, format);
            assert_eq!(list.len(), 3);
            assert_eq!(list.as_bytes().len(), 3 * format.stride());
            for (i, v) in verts.iter().enumerate() {
                assert_eq!(list.unpack_position(i), v.position, "{format:?} vertex {i}");
            }
        }
    }

    #[test]
    fn color_and_uv_quantization() {
        let format = VertFormat::X11A7R6Y11G7B6U12V12;
        let v = Vertex::new(Vec2::new(4.0, 8.0))
            .with_color(Vec4::new(1.0, 0.5, 0.0, 0.25))
            .with_texture_coords(Vec2::new(0.75, 1.0));
        let m = PackedVertList::calc_transform_for_format(&grid_envelope(format), format);
        let list = PackedVertList::pack_verts(&[v], &m, format);
        let out = list.unpack_vertex(0);

        assert_eq!(out.position, Vec2::new(4.0, 8.0));
        assert!((out.color - v.color).abs().max() <= 0.5 / 63.0 + 1e-6);
        assert!((out.texture_coords - v.texture_coords).abs().max() <= 0.5 / 4095.0 + 1e-6);
    }

    #[test]
    fn position_only_format_has_default_color() {
        let format = VertFormat::X12Y12;
        let v = Vertex::new(Vec2::new(1.0, 2.0)).with_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
        let m = PackedVertList::calc_transform_for_format(&grid_envelope(format), format);
        let out = PackedVertList::pack_verts(&[v], &m, format).unpack_vertex(0);
        assert_eq!(out.color, Vertex::default().color);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let format = VertFormat::X11A7R6Y11G7B6;
        let v = Vertex::new(Vec2::new(-50.0, 5000.0)).with_color(Vec4::new(2.0, -1.0, 0.5, 1.0));
        let list = PackedVertList::pack_verts(&[v], &Mat3::identity(), format);
        let out = list.unpack_vertex(0);
        assert_eq!(out.position, Vec2::new(0.0, 2047.0));
        assert_eq!(out.color.x, 1.0);
        assert_eq!(out.color.y, 0.0);
    }

    #[test]
    fn clear_keeps_format() {
        let mut list = PackedVertList::pack_verts(
            &[Vertex::default()],
            &Mat3::identity(),
            VertFormat::X11A7R6Y11G7B6,
        );
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.format(), VertFormat::X11A7R6Y11G7B6);
        assert!(PackedVertList::new(VertFormat::X12Y12).is_empty());
    }
}
