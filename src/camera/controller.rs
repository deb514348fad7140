//! Scroll-driven camera motion.
//!
//! The document scroll offset maps directly onto the camera: it dollies along
//! `z`, drifts slightly along `x` and yaws. Every update also spins the moon
//! by a fixed step, so the moon turns with scroll activity rather than with
//! time.

use glam::Vec3;

use crate::camera::core::PerspectiveCamera;
use crate::options::AnimationOptions;
use crate::scene::SceneContext;

/// Camera fields derived from a scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position `x`.
    pub x: f32,
    /// Camera position `z`.
    pub z: f32,
    /// Camera rotation about `y` (radians).
    pub yaw: f32,
}

/// Maps scroll offsets onto the camera and the moon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollController {
    z_factor: f32,
    x_factor: f32,
    yaw_factor: f32,
    moon_step: Vec3,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::from_options(&AnimationOptions::default())
    }
}

impl ScrollController {
    /// Controller using the scroll factors and moon step from `opts`.
    #[must_use]
    pub fn from_options(opts: &AnimationOptions) -> Self {
        Self {
            z_factor: opts.scroll_z_factor,
            x_factor: opts.scroll_x_factor,
            yaw_factor: opts.scroll_yaw_factor,
            moon_step: Vec3::from(opts.moon_step),
        }
    }

    /// Camera pose for document offset `offset`.
    #[must_use]
    pub fn camera_pose(&self, offset: f32) -> CameraPose {
        CameraPose {
            x: offset * self.x_factor,
            z: offset * self.z_factor,
            yaw: offset * self.yaw_factor,
        }
    }

    /// Write the pose for `offset` into the camera. Position `y` and the
    /// other rotation axes are left untouched.
    pub fn apply_to_camera(
        &self,
        offset: f32,
        camera: &mut PerspectiveCamera,
    ) {
        let pose = self.camera_pose(offset);
        camera.position.x = pose.x;
        camera.position.z = pose.z;
        camera.rotation.y = pose.yaw;
    }

    /// Handle one scroll update: pose the camera and step the moon.
    pub fn apply(&self, offset: f32, ctx: &mut SceneContext) {
        self.apply_to_camera(offset, &mut ctx.camera);
        if let Some(moon) = ctx.scene.mesh_mut(ctx.moon) {
            moon.transform.rotate_by(self.moon_step);
        }
    }
}
