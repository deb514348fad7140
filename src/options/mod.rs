//! Scene and host options with TOML file support.
//!
//! Every tweakable constant of the scene (object dimensions, animation steps,
//! lighting, asset paths, window settings) lives here. The defaults reproduce
//! the stock scene; a TOML file only needs the values it overrides.

mod animation;
mod assets;
mod camera;
mod display;
mod lighting;
mod objects;

use std::path::Path;

pub use animation::AnimationOptions;
pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use objects::{MoonOptions, StarfieldOptions, TorusOptions};
use serde::{Deserialize, Serialize};

use crate::error::MoonscapeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[starfield]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and initial placement.
    pub camera: CameraOptions,
    /// Wireframe torus.
    pub torus: TorusOptions,
    /// Textured moon.
    pub moon: MoonOptions,
    /// Random starfield.
    pub starfield: StarfieldOptions,
    /// Frame and scroll animation steps.
    pub animation: AnimationOptions,
    /// Light parameters.
    pub lighting: LightingOptions,
    /// Texture file paths.
    pub assets: AssetOptions,
    /// Window and scroll emulation.
    pub display: DisplayOptions,
}

impl Options {
    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, MoonscapeError> {
        toml::from_str(content)
            .map_err(|e| MoonscapeError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MoonscapeError> {
        let content =
            std::fs::read_to_string(path).map_err(MoonscapeError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MoonscapeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MoonscapeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MoonscapeError::Io)?;
        }
        std::fs::write(path, content).map_err(MoonscapeError::Io)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[starfield]
count = 50

[torus]
color = 0xff00ff
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.starfield.count, 50);
        assert_eq!(opts.torus.color, 0xff00ff);
        // Everything else should be default
        assert_eq!(opts.starfield.spread, 100.0);
        assert_eq!(opts.torus.tubular_segments, 100);
        assert_eq!(opts.camera.fovy, 90.0);
        assert_eq!(
            opts.assets.moon_map,
            Some(PathBuf::from("assets/moon.jpg"))
        );
    }

    #[test]
    fn defaults_match_stock_scene() {
        let opts = Options::default();
        assert_eq!(opts.camera.position, [50.0, 0.0, 150.0]);
        assert_eq!(opts.moon.position, [-10.0, 0.0, 30.0]);
        assert_eq!(opts.animation.torus_step, [0.01, 0.005, 0.01]);
        assert_eq!(opts.animation.moon_step, [0.05, 0.075, 0.05]);
        assert_eq!(opts.lighting.point_position, [5.0, 5.0, 5.0]);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[camera]\nfovy = \"wide\"");
        assert!(matches!(err, Err(MoonscapeError::OptionsParse(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("moonscape-options-{}", std::process::id()));
        let path = dir.join("scene.toml");
        let mut opts = Options::default();
        opts.starfield.count = 7;
        opts.assets.background = Some(PathBuf::new());
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert!(
            AssetOptions::resolve(loaded.assets.background.as_ref()).is_none()
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Options::load(Path::new("/nonexistent/moonscape.toml"));
        assert!(matches!(err, Err(MoonscapeError::Io(_))));
    }
}
