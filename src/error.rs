//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the moonscape crate.
#[derive(Debug)]
pub enum MoonscapeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Failed to read or decode a texture image.
    TextureLoad {
        /// Path of the image that failed to load.
        path: PathBuf,
        /// Decoder or I/O message.
        reason: String,
    },
    /// WGSL shader composition failure.
    Shader(String),
    /// Viewer event-loop or host (window/canvas) failure.
    Viewer(String),
}

impl fmt::Display for MoonscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TextureLoad { path, reason } => {
                write!(f, "texture load error ({}): {reason}", path.display())
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MoonscapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MoonscapeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for MoonscapeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
