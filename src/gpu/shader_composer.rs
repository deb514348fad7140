use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::MoonscapeError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import moonscape::camera` / `#import moonscape::lighting` to pull in
/// shared code. The composer produces `naga::Module` IR directly, skipping
/// WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

/// Basic (unlit) mesh shader source.
pub const BASIC_SHADER: &str =
    include_str!("../../assets/shaders/raster/basic.wgsl");
/// Standard (lit, textured) mesh shader source.
pub const STANDARD_SHADER: &str =
    include_str!("../../assets/shaders/raster/standard.wgsl");
/// Background shader source.
pub const BACKGROUND_SHADER: &str =
    include_str!("../../assets/shaders/screen/background.wgsl");

impl ShaderComposer {
    /// Composer with the shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, MoonscapeError> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    MoonscapeError::Shader(format!(
                        "failed to register shader module '{}': {e:?}",
                        m.file_path
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, MoonscapeError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a
    /// wgpu shader module. Useful for testing shader composition without a
    /// GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`MoonscapeError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, MoonscapeError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                MoonscapeError::Shader(format!(
                    "failed to compose shader '{file_path}': {e}"
                ))
            })
    }
}
