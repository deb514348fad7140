//! Document scroll emulation for hosts without a scrolling page.

use super::event::WheelDelta;

/// Tracks a virtual document offset driven by wheel movement.
///
/// The offset follows the browser's `getBoundingClientRect().top` convention
/// and is clamped to `[-(document_height - viewport_height), 0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    offset: f32,
    document_height: f32,
    viewport_height: f32,
    line_height: f32,
}

impl ScrollTracker {
    /// Tracker at rest for a document of `document_height` pixels.
    #[must_use]
    pub fn new(
        document_height: f32,
        viewport_height: f32,
        line_height: f32,
    ) -> Self {
        Self {
            offset: 0.0,
            document_height,
            viewport_height,
            line_height,
        }
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Most negative reachable offset.
    #[must_use]
    pub fn min_offset(&self) -> f32 {
        -(self.document_height - self.viewport_height).max(0.0)
    }

    /// Apply wheel movement. Returns the new offset if it changed.
    pub fn apply_wheel(&mut self, delta: WheelDelta) -> Option<f32> {
        let pixels = delta.to_pixels(self.line_height);
        self.set_offset(self.offset + pixels)
    }

    /// Store an absolute offset (clamped). Returns it if it changed.
    pub fn set_offset(&mut self, offset: f32) -> Option<f32> {
        let clamped = offset.clamp(self.min_offset(), 0.0);
        if clamped == self.offset {
            return None;
        }
        self.offset = clamped;
        Some(clamped)
    }

    /// Update the viewport height, re-clamping the offset. Returns the new
    /// offset if the clamp moved it.
    pub fn set_viewport_height(&mut self, height: f32) -> Option<f32> {
        self.viewport_height = height;
        self.set_offset(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_down_scrolls_document_up() {
        let mut tracker = ScrollTracker::new(3000.0, 1000.0, 40.0);
        assert_eq!(tracker.apply_wheel(WheelDelta::Lines(-3.0)), Some(-120.0));
        assert_eq!(
            tracker.apply_wheel(WheelDelta::Pixels(20.0)),
            Some(-100.0)
        );
    }

    #[test]
    fn offset_is_clamped_to_document() {
        let mut tracker = ScrollTracker::new(3000.0, 1000.0, 40.0);
        assert_eq!(tracker.apply_wheel(WheelDelta::Lines(5.0)), None);
        assert_eq!(tracker.offset(), 0.0);

        let _ = tracker.apply_wheel(WheelDelta::Pixels(-10_000.0));
        assert_eq!(tracker.offset(), -2000.0);
        assert_eq!(tracker.apply_wheel(WheelDelta::Lines(-1.0)), None);
    }

    #[test]
    fn taller_viewport_reclamps() {
        let mut tracker = ScrollTracker::new(3000.0, 1000.0, 40.0);
        let _ = tracker.set_offset(-2000.0);
        assert_eq!(tracker.set_viewport_height(2500.0), Some(-500.0));
        // Viewport taller than the document: nothing to scroll.
        assert_eq!(tracker.set_viewport_height(4000.0), Some(0.0));
        assert_eq!(tracker.min_offset(), 0.0);
    }
}
