//! The self-rescheduling frame loop.
//!
//! A tick advances the torus by a fixed rotation step, renders once and asks
//! the host for the next frame. Rendering and scheduling are injected so the
//! same loop runs under winit, under `requestAnimationFrame` and in tests.
//! The step is per tick, not per second: the animation speed follows the
//! display refresh rate.

use std::fmt;

use glam::Vec3;

use crate::options::AnimationOptions;
use crate::scene::SceneContext;

/// Draws the current scene state.
pub trait FrameRenderer {
    /// Failure reported by a render call.
    type Error: fmt::Display;

    /// Render one frame of `ctx`.
    fn render(&mut self, ctx: &SceneContext) -> Result<(), Self::Error>;
}

/// Requests that the host run another tick on its next frame.
pub trait FrameScheduler {
    /// Request the next frame.
    fn request_frame(&mut self);
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self();
    }
}

/// Fixed-step torus animation plus render and reschedule.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLoop {
    torus_step: Vec3,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::from_options(&AnimationOptions::default())
    }
}

impl FrameLoop {
    /// Loop stepping the torus by `opts.torus_step` each tick.
    #[must_use]
    pub fn from_options(opts: &AnimationOptions) -> Self {
        Self {
            torus_step: Vec3::from(opts.torus_step),
            frames: 0,
        }
    }

    /// Advance animation state by one tick without rendering.
    pub fn advance(&mut self, ctx: &mut SceneContext) {
        if let Some(torus) = ctx.scene.mesh_mut(ctx.torus) {
            torus.transform.rotate_by(self.torus_step);
        }
        self.frames += 1;
    }

    /// Run one tick: advance, render, then request the next frame.
    ///
    /// The next frame is requested even when rendering fails, so a lost or
    /// outdated surface only drops frames until the host recovers it. The
    /// render error is returned for the host to act on.
    pub fn tick<R, S>(
        &mut self,
        ctx: &mut SceneContext,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> Result<(), R::Error>
    where
        R: FrameRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.advance(ctx);
        let result = renderer.render(ctx);
        scheduler.request_frame();
        result
    }

    /// Ticks advanced so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
