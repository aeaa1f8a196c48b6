// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Stored as JSON under the user config directory. Missing or invalid
//! config falls back to defaults.

use crate::backends::camera::CameraFacing;
use crate::constants::{QualityPreset, APP_NAME, DEFAULT_OVERLAY_FILENAME};
use crate::errors::{BoothError, BoothResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera facing used for the next stream acquisition
    pub facing: CameraFacing,
    /// Overlay asset path; when unset the default asset is resolved from
    /// the app data directory or the working directory
    pub overlay_path: Option<PathBuf>,
    /// Output directory override for saved artifacts
    pub output_dir: Option<PathBuf>,
    /// JPEG quality preset for snapshots and artifacts
    pub quality: QualityPreset,
    /// Mirror front-camera captures horizontally (selfie mode)
    pub mirror_front_capture: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            facing: CameraFacing::default(),
            overlay_path: None,
            output_dir: None,
            quality: QualityPreset::default(),
            mirror_front_capture: false,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist the config as JSON
    pub fn save(&self) -> BoothResult<()> {
        let path = Self::config_path()
            .ok_or_else(|| BoothError::Config("No config directory available".to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BoothError::Config(e.to_string()))?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the overlay asset path: explicit config first, then the
    /// app data directory, then the working directory.
    pub fn resolve_overlay_path(&self) -> PathBuf {
        if let Some(path) = &self.overlay_path {
            return path.clone();
        }
        if let Some(data_dir) = dirs::data_dir() {
            let candidate = data_dir.join(APP_NAME).join(DEFAULT_OVERLAY_FILENAME);
            if candidate.exists() {
                return candidate;
            }
        }
        PathBuf::from(DEFAULT_OVERLAY_FILENAME)
    }

    /// Resolve the output directory for saved artifacts
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::storage::default_output_dir)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let config = Config {
            facing: CameraFacing::Rear,
            overlay_path: Some(PathBuf::from("/tmp/frame.png")),
            output_dir: None,
            quality: QualityPreset::Maximum,
            mirror_front_capture: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let restored: Config = serde_json::from_str(r#"{"facing":"Rear"}"#).unwrap();
        assert_eq!(restored.facing, CameraFacing::Rear);
        assert_eq!(restored.quality, QualityPreset::High);
    }

    #[test]
    fn test_explicit_overlay_path_wins() {
        let config = Config {
            overlay_path: Some(PathBuf::from("/custom/frame.png")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_overlay_path(),
            PathBuf::from("/custom/frame.png")
        );
    }
}
