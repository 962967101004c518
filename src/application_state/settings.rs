//! # Settings
//!
//! Startup configuration consumed from a single `settings.json` file next
//! to the executable's working directory. The file is read once, before
//! the window exists; nothing re-reads it at runtime.
//!
//! A missing file is not an error — the documented defaults apply and a
//! warning is logged. A file that exists but cannot be parsed is a fatal
//! startup error, since a present-but-broken configuration is worth
//! stopping on.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Window-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title.
    pub title: String,
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
    /// Whether presentation waits for vertical sync.
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: String::from("Voxel Sandbox"),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Camera and movement configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Mouse look swing factor.
    pub look_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            fov_degrees: 90.0,
            move_speed: 10.0,
            look_sensitivity: 10.0,
        }
    }
}

/// Asset location configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding shaders and textures.
    pub directory: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        AssetSettings {
            directory: PathBuf::from("assets"),
        }
    }
}

/// The complete startup configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub assets: AssetSettings,
}

impl Settings {
    /// Loads settings from the given path.
    ///
    /// # Returns
    /// The parsed settings, or defaults (with a logged warning) when the
    /// file does not exist.
    ///
    /// # Errors
    /// A file that exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Settings> {
        if !path.exists() {
            log::warn!(
                "settings file {} not found, using defaults",
                path.display()
            );
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;

        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.window.width, 1280);
        assert_eq!(settings.window.height, 720);
        assert!(settings.window.vsync);
        assert_eq!(settings.camera.fov_degrees, 90.0);
        assert_eq!(settings.camera.move_speed, 10.0);
        assert_eq!(settings.camera.look_sensitivity, 10.0);
        assert_eq!(settings.assets.directory, PathBuf::from("assets"));
    }

    #[test]
    fn partial_files_fall_back_per_section() {
        let settings: Settings =
            serde_json::from_str(r#"{ "window": { "width": 640, "height": 480 } }"#).unwrap();
        assert_eq!(settings.window.width, 640);
        assert_eq!(settings.window.height, 480);
        // Unspecified fields keep their defaults.
        assert_eq!(settings.window.title, "Voxel Sandbox");
        assert_eq!(settings.camera.fov_degrees, 90.0);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(settings.window.width, 1280);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join("voxel-sandbox-settings-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Settings::load(&path);
        assert!(result.is_err());
    }
}
