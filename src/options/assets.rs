use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Image files used by the scene.
///
/// An omitted key keeps the default path; an empty path renders the surface
/// untextured.
pub struct AssetOptions {
    /// Scene background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
    /// Moon color map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_map: Option<PathBuf>,
    /// Moon normal map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_normal_map: Option<PathBuf>,
}

impl AssetOptions {
    /// Resolve a configured path, treating an empty one as unset.
    #[must_use]
    pub fn resolve(path: Option<&PathBuf>) -> Option<&Path> {
        path.map(PathBuf::as_path)
            .filter(|p| !p.as_os_str().is_empty())
    }
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            background: Some(PathBuf::from("assets/space.jpg")),
            moon_map: Some(PathBuf::from("assets/moon.jpg")),
            moon_normal_map: Some(PathBuf::from("assets/normal.jpg")),
        }
    }
}
