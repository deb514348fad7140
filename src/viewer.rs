//! Standalone window backed by winit.
//!
//! The window has no scrolling page, so wheel movement scrolls a virtual
//! document of `display.document_height` pixels and drives the camera
//! exactly as page scrolling does in the browser build.
//!
//! ```no_run
//! # use moonscape::Viewer;
//! Viewer::builder()
//!     .with_title("moonscape")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    assets::TextureSet,
    error::MoonscapeError,
    gpu::render_context::RenderContext,
    input::{InputEvent, WheelDelta},
    options::Options,
    renderer::SceneRenderer,
    SceneEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title (defaults to `display.title`).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let title = self
            .title
            .unwrap_or_else(|| options.display.title.clone());
        Viewer { options, title }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), MoonscapeError> {
        let event_loop = EventLoop::new()
            .map_err(|e| MoonscapeError::Viewer(e.to_string()))?;
        // Frames are requested by the frame loop itself.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            state: None,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MoonscapeError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Renderer and engine, created once the window exists.
struct ViewerState {
    renderer: SceneRenderer,
    engine: SceneEngine,
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    state: Option<ViewerState>,
    options: Options,
    title: String,
}

impl ViewerApp {
    fn init_state(
        &self,
        window: &Arc<Window>,
    ) -> Result<ViewerState, MoonscapeError> {
        let inner = window.inner_size();
        let logical = inner.to_logical::<u32>(window.scale_factor());

        let engine = SceneEngine::new(
            self.options.clone(),
            (logical.width, logical.height),
        );
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
        ))?;
        let images = TextureSet::load_for_scene(&engine.context().scene);
        log::info!("loaded {} texture(s)", images.len());
        let renderer = SceneRenderer::new(
            context,
            images,
            self.options.display.fps_log_interval,
        )?;

        Ok(ViewerState { renderer, engine })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let (Some(window), Some(state)) = (&self.window, &mut self.state)
        else {
            return;
        };
        state.renderer.resize(size.width, size.height);
        let logical = size.to_logical::<u32>(window.scale_factor());
        let _ = state.engine.handle_input(InputEvent::Resized {
            width: logical.width,
            height: logical.height,
        });
        window.request_redraw();
    }

    fn redraw(&mut self) {
        let (Some(window), Some(state)) = (&self.window, &mut self.state)
        else {
            return;
        };
        let mut schedule = || window.request_redraw();
        match state.engine.frame(&mut state.renderer, &mut schedule) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                state.renderer.reconfigure();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.display.width,
                self.options.display.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.init_state(&window) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        }

        // First frame; every later one is requested by the frame loop.
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => self.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size())
                {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(state) = &mut self.state {
                    let _ = state.engine.handle_input(InputEvent::Wheel {
                        delta: WheelDelta::from(delta),
                    });
                }
            }

            _ => (),
        }
    }
}
