//! Mutable placement of a scene object.
//!
//! Rotation is stored as XYZ-ordered Euler angles (radians) rather than a
//! quaternion: the scroll controller and the frame loop advance each axis by
//! a fixed step, and the accumulated angles must stay observable per axis.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation and scale of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in world space.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Transform at the origin with no rotation and unit scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the position.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set the Euler rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Add `step` to each rotation axis.
    pub fn rotate_by(&mut self, step: Vec3) {
        self.rotation += step;
    }

    /// Rotation as a quaternion (XYZ order, matching the Euler storage).
    #[must_use]
    pub fn quat(&self) -> Quat {
        euler_quat(self.rotation)
    }

    /// Local-to-world matrix.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.quat(),
            self.position,
        )
    }
}

/// Quaternion for XYZ-ordered Euler angles.
pub(crate) fn euler_quat(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn rotate_by_accumulates_per_axis() {
        let mut t = Transform::new();
        t.rotate_by(Vec3::new(0.01, 0.005, 0.01));
        t.rotate_by(Vec3::new(0.01, 0.005, 0.01));
        assert!(approx_eq_vec3(t.rotation, Vec3::new(0.02, 0.01, 0.02)));
    }

    #[test]
    fn model_matrix_translates() {
        let t = Transform::new().with_position(Vec3::new(-10.0, 0.0, 30.0));
        let p = t.model_matrix().transform_point3(Vec3::ZERO);
        assert!(approx_eq_vec3(p, Vec3::new(-10.0, 0.0, 30.0)));
    }

    #[test]
    fn yaw_turns_x_toward_negative_z() {
        let t = Transform::new().with_rotation(Vec3::new(
            0.0,
            std::f32::consts::FRAC_PI_2,
            0.0,
        ));
        let p = t.model_matrix().transform_point3(Vec3::X);
        assert!(approx_eq_vec3(p, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform::new()
            .with_position(Vec3::new(1.0, 0.0, 0.0))
            .with_scale(Vec3::splat(2.0));
        let p = t.model_matrix().transform_point3(Vec3::X);
        assert!(approx_eq_vec3(p, Vec3::new(3.0, 0.0, 0.0)));
    }
}
