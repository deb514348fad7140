//! Per-frame animation of the scene.

pub mod frame_loop;

pub use frame_loop::{FrameLoop, FrameRenderer, FrameScheduler};
