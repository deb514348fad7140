//! Scene lights packed into the uniform shared by lit shaders.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::scene::{Light, Scene};

/// Scene lights packed for the shaders
/// NOTE: Must match WGSL struct layout exactly (48 bytes)
///
/// WGSL layout:
///   point_position: vec3<f32>   (offset 0,  align 16)
///   point_intensity: f32        (offset 12)
///   point_color: vec3<f32>      (offset 16, align 16)
///   ambient_intensity: f32      (offset 28)
///   ambient_color: vec3<f32>    (offset 32, align 16)
///   _pad: f32                   (offset 44)
///   Total: 48 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// World position of the point light
    pub point_position: [f32; 3],
    /// Point light intensity (0 when the scene has no point light)
    pub point_intensity: f32,
    /// Point light color
    pub point_color: [f32; 3],
    /// Ambient intensity; colors are pre-multiplied, so this stays 1 or 0
    pub ambient_intensity: f32,
    /// Sum of all ambient light colors scaled by their intensities
    pub ambient_color: [f32; 3],
    pub(crate) _pad: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            point_position: [0.0; 3],
            point_intensity: 0.0,
            point_color: [0.0; 3],
            ambient_intensity: 0.0,
            ambient_color: [0.0; 3],
            _pad: 0.0,
        }
    }
}

impl LightingUniform {
    /// Pack the scene's lights: the first point light, and every ambient
    /// light summed.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let mut uniform = Self::default();
        let mut has_point = false;
        for light in scene.lights() {
            match light {
                Light::Point(point) if !has_point => {
                    has_point = true;
                    uniform.point_position = point.position.to_array();
                    uniform.point_color = point.color;
                    uniform.point_intensity = point.intensity;
                }
                Light::Point(_) => {
                    log::trace!("ignoring additional point light");
                }
                Light::Ambient(ambient) => {
                    uniform.ambient_intensity = 1.0;
                    for (sum, c) in
                        uniform.ambient_color.iter_mut().zip(ambient.color)
                    {
                        *sum += c * ambient.intensity;
                    }
                }
            }
        }
        uniform
    }
}

/// Lighting uniform buffer and its bind group.
pub struct Lighting {
    /// Last uploaded values.
    pub uniform: LightingUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 1 of the standard pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`buffer`](Self::buffer).
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create the buffer with default (unlit) values.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let uniform = LightingUniform::default();

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[uniform_buffer(0, wgpu::ShaderStages::FRAGMENT)],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Lighting Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the scene's lights if they changed.
    pub fn update(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        let uniform = LightingUniform::from_scene(scene);
        if uniform != self.uniform {
            self.uniform = uniform;
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{AmbientLight, PointLight};

    #[test]
    fn layout_is_48_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 48);
    }

    #[test]
    fn empty_scene_is_unlit() {
        assert_eq!(
            LightingUniform::from_scene(&Scene::new()),
            LightingUniform::default()
        );
    }

    #[test]
    fn reflects_scene_lights() {
        let mut scene = Scene::new();
        let _ = scene.add(PointLight {
            position: Vec3::new(5.0, 5.0, 5.0),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        });
        let _ = scene.add(PointLight {
            position: Vec3::new(-1.0, 0.0, 0.0),
            color: [1.0, 0.0, 0.0],
            intensity: 3.0,
        });
        let _ = scene.add(AmbientLight {
            color: [1.0, 0.5, 0.0],
            intensity: 0.5,
        });
        let _ = scene.add(AmbientLight {
            color: [0.0, 0.5, 1.0],
            intensity: 0.5,
        });

        let uniform = LightingUniform::from_scene(&scene);
        assert_eq!(uniform.point_position, [5.0, 5.0, 5.0]);
        assert_eq!(uniform.point_color, [1.0, 1.0, 1.0]);
        assert_eq!(uniform.point_intensity, 1.0);
        assert_eq!(uniform.ambient_intensity, 1.0);
        assert_eq!(uniform.ambient_color, [0.5, 0.5, 0.5]);
    }
}
