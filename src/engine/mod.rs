//! The scene engine: owns the scene context and routes host input and
//! frame ticks to the scroll controller and the frame loop.
//!
//! Hosts (the winit viewer, the browser entry point, tests) construct one
//! [`SceneEngine`], forward [`InputEvent`](crate::input::InputEvent)s to
//! [`SceneEngine::handle_input`] and call [`SceneEngine::frame`] whenever
//! their scheduler fires.

mod accessors;
mod input;

use rand::Rng;

use crate::animation::{FrameLoop, FrameRenderer, FrameScheduler};
use crate::camera::controller::ScrollController;
use crate::input::ScrollTracker;
use crate::options::Options;
use crate::scene::SceneContext;

/// Scene state plus the controllers that animate it.
pub struct SceneEngine {
    options: Options,
    context: SceneContext,
    controller: ScrollController,
    frame_loop: FrameLoop,
    scroll: ScrollTracker,
    scroll_offset: f32,
}

impl SceneEngine {
    /// Build the scene for a viewport of `viewport` logical pixels, placing
    /// stars with the thread-local RNG.
    #[must_use]
    pub fn new(options: Options, viewport: (u32, u32)) -> Self {
        Self::with_rng(options, viewport, &mut rand::rng())
    }

    /// Build the scene for a page that is already scrolled to `offset`
    /// (a browser restoring its scroll position). The scroll controller runs
    /// once, with that offset.
    #[must_use]
    pub fn with_offset(
        options: Options,
        viewport: (u32, u32),
        offset: f32,
    ) -> Self {
        Self::build(options, viewport, offset, &mut rand::rng())
    }

    /// Build the scene drawing star positions from `rng`.
    ///
    /// The scroll controller is applied once with the document at rest,
    /// exactly as a scroll event would.
    pub fn with_rng<R: Rng + ?Sized>(
        options: Options,
        viewport: (u32, u32),
        rng: &mut R,
    ) -> Self {
        Self::build(options, viewport, 0.0, rng)
    }

    fn build<R: Rng + ?Sized>(
        options: Options,
        viewport: (u32, u32),
        offset: f32,
        rng: &mut R,
    ) -> Self {
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        let aspect = width as f32 / height as f32;
        let context = SceneContext::build(&options, aspect, rng);
        let controller = ScrollController::from_options(&options.animation);
        let frame_loop = FrameLoop::from_options(&options.animation);
        let scroll = ScrollTracker::new(
            options.display.document_height,
            height as f32,
            options.display.line_height,
        );

        let mut engine = Self {
            options,
            context,
            controller,
            frame_loop,
            scroll,
            scroll_offset: 0.0,
        };
        engine.apply_scroll(offset);
        engine
    }

    /// Run one frame-loop tick: advance the torus, render, reschedule.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error; the next frame has been requested
    /// regardless.
    pub fn frame<R, S>(
        &mut self,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> Result<(), R::Error>
    where
        R: FrameRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        self.frame_loop.tick(&mut self.context, renderer, scheduler)
    }

    fn apply_scroll(&mut self, offset: f32) {
        self.scroll_offset = offset;
        self.controller.apply(offset, &mut self.context);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn scrolled_start_applies_controller_once() {
        let engine =
            SceneEngine::with_offset(Options::default(), (800, 600), -300.0);
        assert_eq!(engine.scroll_offset(), -300.0);
        assert_eq!(engine.camera().position.z, -300.0 * -0.01);
        let rotation = engine.context().moon().map(|m| m.transform.rotation);
        assert_eq!(rotation, Some(Vec3::new(0.05, 0.075, 0.05)));
    }
}
