/// Platform-agnostic input events.
///
/// Hosts translate their native events into these and feed them to
/// [`SceneEngine::handle_input`](crate::SceneEngine::handle_input).
///
/// # Example
///
/// ```ignore
/// engine.handle_input(InputEvent::Scroll { offset: rect.top() as f32 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Absolute document scroll sample: the top of the document relative to
    /// the viewport (0 at rest, negative once scrolled down).
    Scroll {
        /// Offset in CSS pixels.
        offset: f32,
    },
    /// Relative wheel movement (positive = toward the top of the document).
    Wheel {
        /// Wheel movement.
        delta: WheelDelta,
    },
    /// The drawing surface changed size.
    Resized {
        /// New width in logical pixels.
        width: u32,
        /// New height in logical pixels.
        height: u32,
    },
}

/// Vertical wheel movement in the unit the platform reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Notched wheel lines.
    Lines(f32),
    /// Precise (touchpad) pixels.
    Pixels(f32),
}

impl WheelDelta {
    /// Movement in pixels, using `line_height` pixels per line.
    #[must_use]
    pub fn to_pixels(self, line_height: f32) -> f32 {
        match self {
            Self::Lines(lines) => lines * line_height,
            Self::Pixels(pixels) => pixels,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for WheelDelta {
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => Self::Lines(y),
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                Self::Pixels(pos.y as f32)
            }
        }
    }
}
