//! Texture image loading.
//!
//! Images are decoded to tightly packed RGBA8 on the CPU. Loading never
//! fails the scene: a missing or undecodable file is logged and replaced by
//! a single fallback texel, which renders as an untextured surface.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::MoonscapeError;
use crate::scene::{Material, Scene, TextureSource};

/// Texel substituted for a missing color map or background.
pub const FALLBACK_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Texel substituted for a missing normal map: the unperturbed `+Z` normal.
pub const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

/// Decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Row-major RGBA8 texels, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// A 1×1 image of one texel.
    #[must_use]
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// Bytes per texel row.
    #[must_use]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Decode an encoded PNG or JPEG image. `path` only labels errors.
///
/// # Errors
///
/// Returns [`MoonscapeError::TextureLoad`] if the bytes are not a
/// supported image.
pub fn decode_texture(
    bytes: &[u8],
    path: &Path,
) -> Result<TextureImage, MoonscapeError> {
    let image = image::load_from_memory(bytes).map_err(|e| {
        MoonscapeError::TextureLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    let rgba = image.to_rgba8();
    Ok(TextureImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns [`MoonscapeError::TextureLoad`] if the file cannot be read or
/// decoded.
pub fn load_texture(path: &Path) -> Result<TextureImage, MoonscapeError> {
    let bytes =
        std::fs::read(path).map_err(|e| MoonscapeError::TextureLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    decode_texture(&bytes, path)
}

/// Decoded images keyed by the source that references them.
#[derive(Debug, Default, Clone)]
pub struct TextureSet {
    images: FxHashMap<TextureSource, TextureImage>,
}

impl TextureSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every distinct texture the scene references, in first-use order
    /// (background first).
    #[must_use]
    pub fn sources(scene: &Scene) -> Vec<TextureSource> {
        let mut sources: Vec<TextureSource> =
            scene.background().into_iter().cloned().collect();
        for (_, mesh) in scene.meshes() {
            if let Material::Standard(material) = &mesh.material {
                for source in
                    [&material.map, &material.normal_map].into_iter().flatten()
                {
                    if !sources.contains(source) {
                        sources.push(source.clone());
                    }
                }
            }
        }
        sources
    }

    /// Load every texture the scene references from the filesystem.
    /// Failed loads are left out of the set and render with defaults.
    #[must_use]
    pub fn load_for_scene(scene: &Scene) -> Self {
        let mut set = Self::new();
        for source in Self::sources(scene) {
            match load_texture(source.path()) {
                Ok(image) => set.insert(source, image),
                Err(e) => log::warn!("{e}; rendering untextured"),
            }
        }
        set
    }

    /// Add or replace an image.
    pub fn insert(&mut self, source: TextureSource, image: TextureImage) {
        let _ = self.images.insert(source, image);
    }

    /// Image for `source`, if loaded.
    #[must_use]
    pub fn get(&self, source: &TextureSource) -> Option<&TextureImage> {
        self.images.get(source)
    }

    /// Number of loaded images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no images are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::scene::{Mesh, SphereGeometry, StandardMaterial};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([10, 20, 30, 255]),
        );
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let image =
            decode_texture(&png_bytes(3, 2), Path::new("tiny.png")).unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(&image.pixels[..4], &[10, 20, 30, 255]);
        assert_eq!(image.bytes_per_row(), 12);
    }

    #[test]
    fn garbage_is_a_texture_error() {
        let err = decode_texture(b"not an image", Path::new("bad.jpg"));
        assert!(matches!(
            err,
            Err(MoonscapeError::TextureLoad { ref path, .. })
                if path == Path::new("bad.jpg")
        ));
    }

    #[test]
    fn missing_file_is_a_texture_error() {
        let err = load_texture(Path::new("/nonexistent/moon.jpg"));
        assert!(matches!(err, Err(MoonscapeError::TextureLoad { .. })));
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir()
            .join(format!("moonscape-tex-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(4, 4)).unwrap();
        let image = load_texture(&path).unwrap();
        assert_eq!((image.width, image.height), (4, 4));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn scene_sources_are_deduplicated() {
        let mut scene = Scene::new();
        scene.set_background(Some(TextureSource::new("space.jpg")));
        let material = StandardMaterial {
            map: Some(TextureSource::new("moon.jpg")),
            normal_map: Some(TextureSource::new("normal.jpg")),
            ..StandardMaterial::default()
        };
        for _ in 0..2 {
            let _ = scene.add(Mesh::new(
                SphereGeometry::new(1.0, 8, 8),
                material.clone(),
            ));
        }
        let paths: Vec<_> = TextureSet::sources(&scene)
            .iter()
            .map(|s| s.path().to_path_buf())
            .collect();
        assert_eq!(
            paths,
            vec![
                Path::new("space.jpg").to_path_buf(),
                Path::new("moon.jpg").to_path_buf(),
                Path::new("normal.jpg").to_path_buf(),
            ]
        );

        // Nothing on disk: every load fails and the set stays empty.
        assert!(TextureSet::load_for_scene(&scene).is_empty());
    }
}
