use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Host window and page emulation settings.
pub struct DisplayOptions {
    /// Native window title.
    pub title: String,
    /// Initial native window width in logical pixels.
    pub width: u32,
    /// Initial native window height in logical pixels.
    pub height: u32,
    /// Height of the emulated document the native wheel scrolls through.
    pub document_height: f32,
    /// Pixels per wheel line step.
    pub line_height: f32,
    /// Log a frame-rate summary at debug level every this many seconds.
    /// Zero disables it.
    pub fps_log_interval: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: "moonscape".to_owned(),
            width: 1280,
            height: 720,
            document_height: 6000.0,
            line_height: 40.0,
            fps_log_interval: 5.0,
        }
    }
}
