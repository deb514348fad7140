//! Input handling: platform-agnostic event types and scroll emulation.

/// Platform-agnostic input events.
pub mod event;
/// Wheel-driven document offset tracking.
pub mod scroll;

pub use event::{InputEvent, WheelDelta};
pub use scroll::ScrollTracker;
