use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Point and ambient light parameters.
pub struct LightingOptions {
    /// Point light color as `0xRRGGBB`.
    pub point_color: u32,
    /// Point light intensity.
    pub point_intensity: f32,
    /// Point light world position.
    pub point_position: [f32; 3],
    /// Ambient light color as `0xRRGGBB`.
    pub ambient_color: u32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            point_color: 0xffffff,
            point_intensity: 1.0,
            point_position: [5.0, 5.0, 5.0],
            ambient_color: 0xffffff,
            ambient_intensity: 1.0,
        }
    }
}
