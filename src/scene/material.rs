//! Surface appearance descriptors.

use std::path::{Path, PathBuf};

/// Convert a packed `0xRRGGBB` color to normalized RGB.
#[must_use]
pub fn color_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Image file referenced by a material or the scene background.
///
/// Decoding happens lazily in the renderer; a source whose file is missing
/// or unreadable renders with a default texel instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureSource {
    path: PathBuf,
}

impl TextureSource {
    /// Reference the image at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the image file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Unlit flat-color material; ignores scene lights.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Draw triangle edges as lines instead of filled faces.
    pub wireframe: bool,
}

/// Lit material with optional color and normal maps.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    /// Linear RGB color, multiplied with the color map when present.
    pub color: [f32; 3],
    /// Albedo texture.
    pub map: Option<TextureSource>,
    /// Tangent-space normal map.
    pub normal_map: Option<TextureSource>,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            map: None,
            normal_map: None,
        }
    }
}

/// Immutable appearance attached to a mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Unlit flat color.
    Basic(BasicMaterial),
    /// Lit, optionally textured.
    Standard(StandardMaterial),
}

impl Material {
    /// Base color of the material.
    #[must_use]
    pub fn color(&self) -> [f32; 3] {
        match self {
            Self::Basic(m) => m.color,
            Self::Standard(m) => m.color,
        }
    }

    /// Whether the material is drawn as edges.
    #[must_use]
    pub fn is_wireframe(&self) -> bool {
        matches!(self, Self::Basic(BasicMaterial { wireframe: true, .. }))
    }
}

impl From<BasicMaterial> for Material {
    fn from(m: BasicMaterial) -> Self {
        Self::Basic(m)
    }
}

impl From<StandardMaterial> for Material {
    fn from(m: StandardMaterial) -> Self {
        Self::Standard(m)
    }
}
