use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and initial placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Position before the first scroll update. Only `y` survives it: the
    /// controller overwrites `x` and `z` at startup.
    pub position: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 90.0,
            znear: 0.1,
            zfar: 1000.0,
            position: [50.0, 0.0, 150.0],
        }
    }
}
