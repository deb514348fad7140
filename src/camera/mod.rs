//! Camera model and its scroll-driven controller.

/// Scroll offset to camera pose mapping.
pub mod controller;
/// Perspective camera and GPU uniform types.
pub mod core;
