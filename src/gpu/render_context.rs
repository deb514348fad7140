//! Device, queue and presentation surface shared by every pass.

use std::fmt;

/// Why a [`RenderContext`] could not be created.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window or canvas rejected surface creation.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the WebGL2-level limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter offers no configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => {
                write!(f, "surface creation failed: {e}")
            }
            Self::AdapterRequest(e) => {
                write!(f, "no compatible GPU adapter found: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "surface configuration not supported by adapter")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// GPU handles for one window or canvas.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    /// Swapchain surface.
    pub surface: wgpu::Surface<'static>,
    /// Format, size and FIFO present mode of `surface`.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device presenting to `target` at `initial_size` physical
    /// pixels.
    ///
    /// Limits are the WebGL2 downlevel set raised to the adapter's texture
    /// resolution, so the same context works natively and in the browser.
    ///
    /// # Errors
    ///
    /// Returns the [`RenderContextError`] of the first step that fails.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(target)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        log::info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let width = initial_size.0.max(1);
        let height = initial_size.1.max(1);
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;

        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Color format of the swapchain.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Resize the swapchain. A zero dimension (minimized window) is
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Re-apply the current configuration after `Lost`/`Outdated`.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain texture to draw into.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] reported by the surface.
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Encoder for one frame's passes.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
    }

    /// Finish and submit `encoder`.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}
