//! Input routing for SceneEngine

use super::SceneEngine;
use crate::input::InputEvent;

impl SceneEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Returns `true` if the camera or the scene changed.
    ///
    /// - `Scroll` samples are authoritative and always run the scroll
    ///   controller, even when the offset repeats.
    /// - `Wheel` movement scrolls the emulated document and runs the
    ///   controller only if the offset moved.
    /// - `Resized` updates the camera aspect and re-clamps the emulated
    ///   document.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::Wheel { delta: WheelDelta::Lines(-1.0) });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Scroll { offset } => {
                self.apply_scroll(offset);
                true
            }
            InputEvent::Wheel { delta } => {
                match self.scroll.apply_wheel(delta) {
                    Some(offset) => {
                        self.apply_scroll(offset);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    return false;
                }
                self.context.camera.resize(width, height);
                if let Some(offset) =
                    self.scroll.set_viewport_height(height as f32)
                {
                    self.apply_scroll(offset);
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::input::WheelDelta;
    use crate::options::Options;

    fn engine() -> SceneEngine {
        let mut options = Options::default();
        options.display.document_height = 2000.0;
        options.display.line_height = 50.0;
        let mut rng = StdRng::seed_from_u64(5);
        SceneEngine::with_rng(options, (1000, 1000), &mut rng)
    }

    #[test]
    fn wheel_moves_camera_through_document() {
        let mut engine = engine();
        assert!(engine.handle_input(InputEvent::Wheel {
            delta: WheelDelta::Lines(-4.0),
        }));
        assert_eq!(engine.scroll_offset(), -200.0);
        assert_eq!(engine.camera().position.z, -200.0 * -0.01);
    }

    #[test]
    fn wheel_at_document_top_changes_nothing() {
        let mut engine = engine();
        let moon = engine.context().moon().map(|m| m.transform);
        assert!(!engine.handle_input(InputEvent::Wheel {
            delta: WheelDelta::Pixels(30.0),
        }));
        assert_eq!(engine.context().moon().map(|m| m.transform), moon);
    }

    #[test]
    fn repeated_scroll_samples_keep_spinning_the_moon() {
        let mut engine = engine();
        let before = engine.context().moon().map(|m| m.transform.rotation.y);
        let _ = engine.handle_input(InputEvent::Scroll { offset: -10.0 });
        let _ = engine.handle_input(InputEvent::Scroll { offset: -10.0 });
        let after = engine.context().moon().map(|m| m.transform.rotation.y);
        let (Some(before), Some(after)) = (before, after) else {
            panic!("moon missing");
        };
        assert!((after - before - 2.0 * 0.075).abs() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect_and_reclamps() {
        let mut engine = engine();
        let _ = engine.handle_input(InputEvent::Scroll { offset: 0.0 });
        let _ = engine.handle_input(InputEvent::Wheel {
            delta: WheelDelta::Pixels(-1000.0),
        });
        assert_eq!(engine.scroll_offset(), -1000.0);

        assert!(engine.handle_input(InputEvent::Resized {
            width: 1600,
            height: 1600,
        }));
        assert_eq!(engine.camera().aspect, 1.0);
        assert_eq!(engine.scroll_offset(), -400.0);

        assert!(!engine.handle_input(InputEvent::Resized {
            width: 0,
            height: 0,
        }));
    }
}
