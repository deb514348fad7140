//! Light definitions for the scene.

use glam::Vec3;

/// An omnidirectional light at a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// Light position in world space.
    pub position: Vec3,
    /// Light color.
    pub color: [f32; 3],
    /// Light intensity.
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Uniform light reaching every surface equally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    /// Light color.
    pub color: [f32; 3],
    /// Light intensity.
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Any light that can be added to a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Localized light.
    Point(PointLight),
    /// Global light.
    Ambient(AmbientLight),
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Self::Point(light)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Self::Ambient(light)
    }
}
