//! Read accessors for SceneEngine

use super::SceneEngine;
use crate::camera::core::PerspectiveCamera;
use crate::options::Options;
use crate::scene::SceneContext;

impl SceneEngine {
    /// Scene, camera and object handles.
    #[must_use]
    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// The viewing camera.
    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.context.camera
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Offset last applied by the scroll controller.
    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Frame-loop ticks run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_loop.frame_count()
    }
}
