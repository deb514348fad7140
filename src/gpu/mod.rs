//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, dynamic buffer management,
//! texture upload, pipeline boilerplate and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Shared wgpu boilerplate helpers for mesh and screen-space pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Sampled and depth textures.
pub mod texture;
