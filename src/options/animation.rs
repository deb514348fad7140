use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Per-tick and per-scroll animation steps.
///
/// Scroll factors multiply the document offset, which is negative once the
/// page has been scrolled down.
pub struct AnimationOptions {
    /// Torus Euler rotation added every frame (radians).
    pub torus_step: [f32; 3],
    /// Moon Euler rotation added on every scroll update (radians).
    pub moon_step: [f32; 3],
    /// Camera `z` per unit of scroll offset.
    pub scroll_z_factor: f32,
    /// Camera `x` per unit of scroll offset.
    pub scroll_x_factor: f32,
    /// Camera yaw (radians) per unit of scroll offset.
    pub scroll_yaw_factor: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            torus_step: [0.01, 0.005, 0.01],
            moon_step: [0.05, 0.075, 0.05],
            scroll_z_factor: -0.01,
            scroll_x_factor: -0.0002,
            scroll_yaw_factor: -0.0002,
        }
    }
}
