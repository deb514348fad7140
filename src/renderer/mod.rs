//! GPU rendering of a [`SceneContext`].
//!
//! One render pass per frame: clear to black, draw the background, then
//! every mesh batch against a shared depth buffer.

pub mod background;
pub mod batch;
pub mod mesh_pass;

use wgpu::util::DeviceExt;

use self::background::BackgroundPass;
use self::mesh_pass::{MeshPass, TextureCache};
use crate::animation::FrameRenderer;
use crate::assets::TextureSet;
use crate::camera::core::CameraUniform;
use crate::error::MoonscapeError;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::scene::SceneContext;
use crate::util::frame_timing::FrameTiming;
use crate::util::lighting::Lighting;

/// Camera uniform buffer and its bind group (group 0 of every mesh
/// pipeline).
struct CameraBinding {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    fn new(device: &wgpu::Device) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::new()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            buffer,
            layout,
            bind_group,
        }
    }
}

/// Renders the scene to a window or canvas surface.
pub struct SceneRenderer {
    context: RenderContext,
    camera: CameraBinding,
    lighting: Lighting,
    depth: DepthTexture,
    mesh_pass: MeshPass,
    background: BackgroundPass,
    images: TextureSet,
    textures: TextureCache,
    frame_timing: FrameTiming,
}

impl SceneRenderer {
    /// Build every pipeline for `context`'s surface format.
    ///
    /// `images` holds the decoded textures the scene references; sources
    /// missing from it render with default textures.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Shader`] if a shader fails to compose.
    pub fn new(
        context: RenderContext,
        images: TextureSet,
        fps_log_interval: f32,
    ) -> Result<Self, MoonscapeError> {
        let mut composer = ShaderComposer::new()?;
        let camera = CameraBinding::new(&context.device);
        let lighting = Lighting::new(&context);
        let mesh_pass = MeshPass::new(
            &context,
            &mut composer,
            &camera.layout,
            &lighting.layout,
        )?;
        let background = BackgroundPass::new(&context, &mut composer)?;
        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);
        let textures = TextureCache::new(&context);
        log::info!(
            "renderer ready: {width}x{height} {:?}",
            context.format()
        );

        Ok(Self {
            context,
            camera,
            lighting,
            depth,
            mesh_pass,
            background,
            images,
            textures,
            frame_timing: FrameTiming::new(fps_log_interval),
        })
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Resize the surface and depth buffer. Ignores zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Replace the decoded texture set; materials are rebound on the next
    /// frame.
    pub fn set_images(&mut self, images: TextureSet) {
        self.images = images;
        self.textures.clear();
        self.mesh_pass.invalidate();
        self.background.invalidate();
    }

    /// Render one frame of `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain texture could be
    /// acquired.
    pub fn render_scene(
        &mut self,
        ctx: &SceneContext,
    ) -> Result<(), wgpu::SurfaceError> {
        let uniform = CameraUniform::from_camera(&ctx.camera);
        self.context.queue.write_buffer(
            &self.camera.buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
        self.lighting.update(&self.context.queue, &ctx.scene);
        self.background.prepare(
            &self.context,
            &ctx.scene,
            &self.images,
            &mut self.textures,
        );
        self.mesh_pass.prepare(
            &self.context,
            &ctx.scene,
            &self.images,
            &mut self.textures,
        );

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
            self.background.draw(&mut rp);
            self.mesh_pass.draw(
                &mut rp,
                &self.camera.bind_group,
                &self.lighting.bind_group,
            );
        }
        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }
}

impl FrameRenderer for SceneRenderer {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, ctx: &SceneContext) -> Result<(), Self::Error> {
        self.render_scene(ctx)
    }
}
