use glam::{Mat4, Vec3};

use crate::options::CameraOptions;
use crate::scene::transform::euler_quat;

/// Perspective camera placed by a position and XYZ Euler rotation.
///
/// With zero rotation the camera looks down `-Z` with `+Y` up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl PerspectiveCamera {
    /// Camera from options with the given aspect ratio.
    #[must_use]
    pub fn from_options(opts: &CameraOptions, aspect: f32) -> Self {
        Self {
            position: Vec3::from(opts.position),
            rotation: Vec3::ZERO,
            aspect,
            fovy: opts.fovy,
            znear: opts.znear,
            zfar: opts.zfar,
        }
    }

    /// Update the aspect ratio from a surface size. Zero-sized surfaces
    /// (minimized windows) keep the previous ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Camera-to-world matrix.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            euler_quat(self.rotation),
            self.position,
        )
    }

    /// World-to-camera matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.view_matrix()
    }

    /// Unit view direction in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        euler_quat(self.rotation) * Vec3::NEG_Z
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 16.0 / 9.0)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Uniform for the camera's current state.
    #[must_use]
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let mut uniform = Self::new();
        uniform.update_view_proj(camera);
        uniform
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &PerspectiveCamera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.position.to_array();
    }
}
