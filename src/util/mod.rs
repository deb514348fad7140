//! Shared utilities for the rendering engine.
//!
//! Helpers for frame timing and the scene lighting uniform.

/// Smoothed FPS and periodic frame-rate logging.
pub mod frame_timing;
/// Lighting uniform and its bind group.
pub mod lighting;
