//! Sampled textures and the depth attachment.

use crate::assets::TextureImage;

/// Depth format used by every scene pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A sampled 2D texture uploaded from a decoded image.
pub struct GpuTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    /// Upload `image`. Color data should use an sRGB format, normal maps a
    /// linear one.
    #[must_use]
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &TextureImage,
        format: wgpu::TextureFormat,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture with the given dimensions.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}
