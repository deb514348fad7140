//! Instanced mesh drawing for basic and standard materials.
//!
//! Batches (see [`batch`](super::batch)) are turned into GPU buffers and
//! material bind groups whenever the scene generation changes. Instance
//! matrices are re-uploaded every frame since the torus and the moon move.

use std::ops::Range;

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use super::batch::{instance_data, plan_batches, DrawBatch};
use crate::assets::{TextureImage, TextureSet, FALLBACK_COLOR, FLAT_NORMAL};
use crate::error::MoonscapeError;
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::pipeline_helpers::{
    create_mesh_pipeline, filtering_sampler, repeat_sampler, texture_2d,
    uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{
    ShaderComposer, BASIC_SHADER, STANDARD_SHADER,
};
use crate::gpu::texture::GpuTexture;
use crate::scene::{Material, Scene, TextureSource};

/// Per-material uniform shared by the basic and standard shaders
/// NOTE: Must match WGSL `MaterialUniform` (32 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniform {
    color: [f32; 4],
    normal_scale: [f32; 2],
    _pad: [f32; 2],
}

impl MaterialUniform {
    fn from_material(material: &Material) -> Self {
        let [r, g, b] = material.color();
        Self {
            color: [r, g, b, 1.0],
            normal_scale: [1.0, 1.0],
            _pad: [0.0; 2],
        }
    }
}

/// How a texture is sampled; decides its format and its fallback texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TextureRole {
    /// Color data, stored sRGB.
    Color,
    /// Tangent-space normals, stored linear.
    Normal,
}

impl TextureRole {
    fn format(self) -> wgpu::TextureFormat {
        match self {
            Self::Color => wgpu::TextureFormat::Rgba8UnormSrgb,
            Self::Normal => wgpu::TextureFormat::Rgba8Unorm,
        }
    }

    fn fallback(self) -> [u8; 4] {
        match self {
            Self::Color => FALLBACK_COLOR,
            Self::Normal => FLAT_NORMAL,
        }
    }
}

/// GPU textures keyed by source and role, plus the per-role defaults.
pub(crate) struct TextureCache {
    textures: FxHashMap<(TextureSource, TextureRole), GpuTexture>,
    white: GpuTexture,
    flat_normal: GpuTexture,
}

impl TextureCache {
    pub(crate) fn new(context: &RenderContext) -> Self {
        let solid = |role: TextureRole, label: &str| {
            GpuTexture::from_image(
                &context.device,
                &context.queue,
                label,
                &TextureImage::solid(role.fallback()),
                role.format(),
            )
        };
        Self {
            textures: FxHashMap::default(),
            white: solid(TextureRole::Color, "Default Color Texture"),
            flat_normal: solid(TextureRole::Normal, "Default Normal Texture"),
        }
    }

    /// Drop every uploaded texture (after the image set changed).
    pub(crate) fn clear(&mut self) {
        self.textures.clear();
    }

    /// View for `source`, uploading it on first use. Sources missing from
    /// `images` (or `None`) resolve to the role's default texture.
    pub(crate) fn view(
        &mut self,
        context: &RenderContext,
        images: &TextureSet,
        source: Option<&TextureSource>,
        role: TextureRole,
    ) -> wgpu::TextureView {
        let default = match role {
            TextureRole::Color => &self.white,
            TextureRole::Normal => &self.flat_normal,
        };
        let Some(source) = source else {
            return default.view.clone();
        };
        let Some(image) = images.get(source) else {
            return default.view.clone();
        };
        self.textures
            .entry((source.clone(), role))
            .or_insert_with(|| {
                log::debug!(
                    "uploading {} ({}x{}, {role:?})",
                    source.path().display(),
                    image.width,
                    image.height
                );
                GpuTexture::from_image(
                    &context.device,
                    &context.queue,
                    &source.path().display().to_string(),
                    image,
                    role.format(),
                )
            })
            .view
            .clone()
    }
}

/// Which pipeline a batch draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineKind {
    /// Unlit edges.
    Wireframe,
    /// Unlit filled triangles.
    BasicFill,
    /// Lit, textured triangles.
    Standard,
}

struct GpuBatch {
    kind: PipelineKind,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material_bind_group: wgpu::BindGroup,
}

/// Instanced mesh renderer for every material kind in the scene.
pub struct MeshPass {
    wireframe_pipeline: wgpu::RenderPipeline,
    basic_fill_pipeline: wgpu::RenderPipeline,
    standard_pipeline: wgpu::RenderPipeline,
    basic_material_layout: wgpu::BindGroupLayout,
    standard_material_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    plan: Vec<DrawBatch>,
    batches: Vec<GpuBatch>,
    instance_ranges: Vec<Range<u32>>,
    instance_buffer: DynamicBuffer,
    generation: Option<u64>,
}

impl MeshPass {
    /// Build the pipelines. `camera_layout` is bind group 0 of both
    /// pipelines, `lighting_layout` group 1 of the standard one.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Shader`] if a shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, MoonscapeError> {
        let device = &context.device;
        let basic_material_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Basic Material Layout"),
                entries: &[uniform_buffer(0, wgpu::ShaderStages::FRAGMENT)],
            },
        );
        let standard_material_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Standard Material Layout"),
                entries: &[
                    uniform_buffer(0, wgpu::ShaderStages::FRAGMENT),
                    texture_2d(1),
                    texture_2d(2),
                    filtering_sampler(3),
                ],
            },
        );

        let basic_shader = composer.compose(
            device,
            "Basic Shader",
            BASIC_SHADER,
            "raster/basic.wgsl",
        )?;
        let standard_shader = composer.compose(
            device,
            "Standard Shader",
            STANDARD_SHADER,
            "raster/standard.wgsl",
        )?;

        let basic_layouts = [camera_layout, &basic_material_layout];
        let wireframe_pipeline = create_mesh_pipeline(
            device,
            "Wireframe",
            &basic_shader,
            context.format(),
            wgpu::PrimitiveTopology::LineList,
            &basic_layouts,
        );
        let basic_fill_pipeline = create_mesh_pipeline(
            device,
            "Basic",
            &basic_shader,
            context.format(),
            wgpu::PrimitiveTopology::TriangleList,
            &basic_layouts,
        );
        let standard_pipeline = create_mesh_pipeline(
            device,
            "Standard",
            &standard_shader,
            context.format(),
            wgpu::PrimitiveTopology::TriangleList,
            &[camera_layout, lighting_layout, &standard_material_layout],
        );

        Ok(Self {
            wireframe_pipeline,
            basic_fill_pipeline,
            standard_pipeline,
            basic_material_layout,
            standard_material_layout,
            sampler: repeat_sampler(device, "Material Sampler"),
            plan: Vec::new(),
            batches: Vec::new(),
            instance_ranges: Vec::new(),
            instance_buffer: DynamicBuffer::new(
                device,
                "Instance Buffer",
                64 * 256,
                wgpu::BufferUsages::VERTEX,
            ),
            generation: None,
        })
    }

    /// Force a batch rebuild on the next [`prepare`](Self::prepare).
    pub fn invalidate(&mut self) {
        self.generation = None;
    }

    /// Rebuild batches if the scene structure changed, then upload this
    /// frame's instance matrices.
    pub(crate) fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        images: &TextureSet,
        textures: &mut TextureCache,
    ) {
        if self.generation != Some(scene.generation()) {
            self.rebuild(context, scene, images, textures);
            self.generation = Some(scene.generation());
        }
        let (matrices, ranges) = instance_data(scene, &self.plan);
        let _ = self.instance_buffer.write(
            &context.device,
            &context.queue,
            &matrices,
        );
        self.instance_ranges = ranges;
    }

    fn rebuild(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        images: &TextureSet,
        textures: &mut TextureCache,
    ) {
        self.plan = plan_batches(scene);
        self.batches = self
            .plan
            .iter()
            .map(|batch| self.upload_batch(context, batch, images, textures))
            .collect();
        log::debug!(
            "rebuilt {} draw batches for scene generation {}",
            self.batches.len(),
            scene.generation()
        );
    }

    fn upload_batch(
        &self,
        context: &RenderContext,
        batch: &DrawBatch,
        images: &TextureSet,
        textures: &mut TextureCache,
    ) -> GpuBatch {
        let device = &context.device;
        let label = batch.geometry.label();
        let mesh = batch.geometry.tessellate();

        let kind = match &batch.material {
            Material::Basic(m) if m.wireframe => PipelineKind::Wireframe,
            Material::Basic(_) => PipelineKind::BasicFill,
            Material::Standard(_) => PipelineKind::Standard,
        };
        let indices = match kind {
            PipelineKind::Wireframe => mesh.wireframe_indices(),
            PipelineKind::BasicFill | PipelineKind::Standard => mesh.indices,
        };

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let material_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Material Buffer")),
                contents: bytemuck::cast_slice(&[
                    MaterialUniform::from_material(&batch.material),
                ]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let material_bind_group = match &batch.material {
            Material::Basic(_) => {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{label} Basic Material")),
                    layout: &self.basic_material_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: material_buffer.as_entire_binding(),
                    }],
                })
            }
            Material::Standard(material) => {
                let map = textures.view(
                    context,
                    images,
                    material.map.as_ref(),
                    TextureRole::Color,
                );
                let normal_map = textures.view(
                    context,
                    images,
                    material.normal_map.as_ref(),
                    TextureRole::Normal,
                );
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{label} Standard Material")),
                    layout: &self.standard_material_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: material_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(&map),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::TextureView(
                                &normal_map,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: wgpu::BindingResource::Sampler(
                                &self.sampler,
                            ),
                        },
                    ],
                })
            }
        };

        GpuBatch {
            kind,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            material_bind_group,
        }
    }

    /// Record every batch into `rp`.
    pub fn draw(
        &self,
        rp: &mut wgpu::RenderPass<'_>,
        camera: &wgpu::BindGroup,
        lighting: &wgpu::BindGroup,
    ) {
        rp.set_vertex_buffer(1, self.instance_buffer.buffer().slice(..));
        let ranges = &self.instance_ranges;
        for (batch, instances) in self.batches.iter().zip(ranges) {
            if instances.is_empty() || batch.index_count == 0 {
                continue;
            }
            rp.set_bind_group(0, camera, &[]);
            match batch.kind {
                PipelineKind::Wireframe | PipelineKind::BasicFill => {
                    let pipeline = if batch.kind == PipelineKind::Wireframe {
                        &self.wireframe_pipeline
                    } else {
                        &self.basic_fill_pipeline
                    };
                    rp.set_pipeline(pipeline);
                    rp.set_bind_group(1, &batch.material_bind_group, &[]);
                }
                PipelineKind::Standard => {
                    rp.set_pipeline(&self.standard_pipeline);
                    rp.set_bind_group(1, lighting, &[]);
                    rp.set_bind_group(2, &batch.material_bind_group, &[]);
                }
            }
            rp.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
            rp.set_index_buffer(
                batch.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            rp.draw_indexed(0..batch.index_count, 0, instances.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{BasicMaterial, StandardMaterial};

    #[test]
    fn material_uniform_is_32_bytes() {
        assert_eq!(size_of::<MaterialUniform>(), 32);
    }

    #[test]
    fn material_uniform_carries_opaque_color() {
        let basic = Material::from(BasicMaterial {
            color: [0.0, 1.0, 0.0],
            wireframe: true,
        });
        let uniform = MaterialUniform::from_material(&basic);
        assert_eq!(uniform.color, [0.0, 1.0, 0.0, 1.0]);

        let standard = Material::from(StandardMaterial::default());
        let uniform = MaterialUniform::from_material(&standard);
        assert_eq!(uniform.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(uniform.normal_scale, [1.0, 1.0]);
    }

    #[test]
    fn roles_pick_format_and_fallback() {
        assert_eq!(
            TextureRole::Color.format(),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(TextureRole::Normal.fallback(), FLAT_NORMAL);
    }
}
