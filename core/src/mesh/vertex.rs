//! Vertex and per-mesh shader metadata.

use bitflags::bitflags;

use crate::math::{Vec2, Vec4};

/// Seconds on the host's frame clock.
pub type FrameTimeS = f64;

/// An unpacked vertex.
///
/// `shader_data` is opaque to the geometry code; the stroke extruder's
/// vertex callback uses it to stamp per-vertex values (e.g. creation time
/// and pressure) that animated shaders read back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    /// Linear RGBA in `0..=1`.
    pub color: Vec4,
    pub texture_coords: Vec2,
    pub shader_data: [f32; 2],
}

impl Vertex {
    /// Opaque black vertex at `position`.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            texture_coords: Vec2::zeros(),
            shader_data: [0.0; 2],
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture_coords(mut self, uv: Vec2) -> Self {
        self.texture_coords = uv;
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Vec2::zeros())
    }
}

bitflags! {
    /// Which special shader path a mesh needs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShaderFlags: u8 {
        const ANIMATED = 1 << 0;
        const PARTICLE = 1 << 1;
        /// Particle animation loops instead of ending.
        const CYCLING = 1 << 2;
        const ERASER = 1 << 3;
    }
}

/// Shader flags plus the frame time the animation started at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShaderMetadata {
    pub flags: ShaderFlags,
    pub init_time: FrameTimeS,
}

impl ShaderMetadata {
    /// Plain, non-animated geometry.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn animated(init_time: FrameTimeS) -> Self {
        Self {
            flags: ShaderFlags::ANIMATED,
            init_time,
        }
    }

    pub fn eraser() -> Self {
        Self {
            flags: ShaderFlags::ERASER,
            init_time: 0.0,
        }
    }

    pub fn particle(init_time: FrameTimeS, cycling: bool) -> Self {
        let mut flags = ShaderFlags::PARTICLE;
        flags.set(ShaderFlags::CYCLING, cycling);
        Self { flags, init_time }
    }

    pub fn is_animated(&self) -> bool {
        self.flags.contains(ShaderFlags::ANIMATED)
    }

    pub fn is_particle(&self) -> bool {
        self.flags.contains(ShaderFlags::PARTICLE)
    }

    pub fn is_cycling(&self) -> bool {
        self.flags.contains(ShaderFlags::CYCLING)
    }

    pub fn is_eraser(&self) -> bool {
        self.flags.contains(ShaderFlags::ERASER)
    }
}

/// Reference to a texture owned by the host's texture manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureInfo {
    pub uri: String,
}

impl TextureInfo {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}
