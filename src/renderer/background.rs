//! Full-viewport background image.

use super::mesh_pass::{TextureCache, TextureRole};
use crate::assets::TextureSet;
use crate::error::MoonscapeError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, BACKGROUND_SHADER};
use crate::scene::Scene;

/// Draws the scene background behind every mesh.
///
/// Nothing is drawn when the scene has no background or its image failed
/// to load; the cleared black frame shows through.
pub struct BackgroundPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    bind_group: Option<wgpu::BindGroup>,
    generation: Option<u64>,
}

impl BackgroundPass {
    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Shader`] if the shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
    ) -> Result<Self, MoonscapeError> {
        let device = &context.device;
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Background Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });
        let shader = composer.compose(
            device,
            "Background Shader",
            BACKGROUND_SHADER,
            "screen/background.wgsl",
        )?;
        let pipeline = create_screen_space_pipeline(
            device,
            "Background",
            &shader,
            context.format(),
            &[&layout],
        );
        Ok(Self {
            pipeline,
            layout,
            sampler: linear_sampler(device, "Background Sampler"),
            bind_group: None,
            generation: None,
        })
    }

    /// Force a rebuild on the next [`prepare`](Self::prepare).
    pub fn invalidate(&mut self) {
        self.generation = None;
    }

    /// Rebind the background image if the scene changed.
    pub(crate) fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        images: &TextureSet,
        textures: &mut TextureCache,
    ) {
        if self.generation == Some(scene.generation()) {
            return;
        }
        self.generation = Some(scene.generation());
        self.bind_group = scene
            .background()
            .filter(|source| images.get(source).is_some())
            .map(|source| {
                let view = textures.view(
                    context,
                    images,
                    Some(source),
                    TextureRole::Color,
                );
                context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Background Bind Group"),
                    layout: &self.layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(
                                &self.sampler,
                            ),
                        },
                    ],
                })
            });
    }

    /// Record the background draw into `rp`.
    pub fn draw(&self, rp: &mut wgpu::RenderPass<'_>) {
        if let Some(bind_group) = &self.bind_group {
            rp.set_pipeline(&self.pipeline);
            rp.set_bind_group(0, bind_group, &[]);
            rp.draw(0..3, 0..1);
        }
    }
}
