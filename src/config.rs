use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Tuning file looked up next to the executable's working directory
pub const TUNING_FILE: &str = "sandbox.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Gameplay tuning knobs.
///
/// Window title and dimensions are compile-time constants, not tuning.
/// Every field has a default, so a partial file only overrides what it
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward gravity in m/s^2 (the world is y-down)
    pub gravity: f32,
    /// Horizontal force in newtons while A or D is held
    pub drive_force: f32,
    /// Single-step upward force in newtons when Space is pressed
    pub jump_force: f32,
    /// Side length of the player box and of spawned boxes, in meters
    pub box_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            drive_force: 10.0,
            jump_force: 500.0,
            box_size: 1.0,
        }
    }
}

impl Tuning {
    pub fn from_toml_str(path: &str, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&path.display().to_string(), &contents)
    }

    /// Loads the tuning file, falling back to defaults when it is
    /// missing or malformed. Only a malformed file gets a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(tuning) => tuning,
            Err(ConfigError::Io { path, .. }) => {
                debug!(%path, "no tuning file, using defaults");
                Self::default()
            }
            Err(error @ ConfigError::Parse { .. }) => {
                warn!(%error, "ignoring malformed tuning file");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 9.8);
        assert_eq!(tuning.drive_force, 10.0);
        assert_eq!(tuning.jump_force, 500.0);
        assert_eq!(tuning.box_size, 1.0);
    }

    #[test]
    fn full_file_overrides_everything() {
        let tuning = Tuning::from_toml_str(
            TUNING_FILE,
            "gravity = 3.7\ndrive_force = 25.0\njump_force = 800.0\nbox_size = 2.0\n",
        )
        .unwrap();
        assert_eq!(
            tuning,
            Tuning {
                gravity: 3.7,
                drive_force: 25.0,
                jump_force: 800.0,
                box_size: 2.0,
            }
        );
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let tuning = Tuning::from_toml_str(TUNING_FILE, "jump_force = 650.0\n").unwrap();
        assert_eq!(tuning.jump_force, 650.0);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
        assert_eq!(tuning.drive_force, Tuning::default().drive_force);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let result = Tuning::from_toml_str(TUNING_FILE, "gravity = \"down\"\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tuning = Tuning::load_or_default("does/not/exist/sandbox.toml");
        assert_eq!(tuning, Tuning::default());
    }
}
