use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Wireframe torus at the scene origin.
pub struct TorusOptions {
    /// Ring radius.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Segments around the tube.
    pub radial_segments: u32,
    /// Segments along the ring.
    pub tubular_segments: u32,
    /// Line color as `0xRRGGBB`.
    pub color: u32,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            radius: 10.0,
            tube: 3.0,
            radial_segments: 16,
            tubular_segments: 100,
            color: 0x00ff00,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Textured moon sphere.
pub struct MoonOptions {
    /// Sphere radius.
    pub radius: f32,
    /// Longitude segments.
    pub width_segments: u32,
    /// Latitude segments.
    pub height_segments: u32,
    /// World position.
    pub position: [f32; 3],
}

impl Default for MoonOptions {
    fn default() -> Self {
        Self {
            radius: 8.0,
            width_segments: 32,
            height_segments: 32,
            position: [-10.0, 0.0, 30.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Randomly scattered star spheres.
pub struct StarfieldOptions {
    /// Number of stars generated at startup.
    pub count: u32,
    /// Star sphere radius.
    pub radius: f32,
    /// Segments per axis of each star sphere.
    pub segments: u32,
    /// Full width of the cube stars are scattered in, centred on the origin.
    pub spread: f32,
    /// Star color as `0xRRGGBB`.
    pub color: u32,
}

impl Default for StarfieldOptions {
    fn default() -> Self {
        Self {
            count: 200,
            radius: 0.25,
            segments: 24,
            spread: 100.0,
            color: 0xffffff,
        }
    }
}
