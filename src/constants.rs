// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};

/// Application name, used for config and data directories
pub const APP_NAME: &str = "framebooth";

/// Fixed filename stem for the exported booth artifact.
///
/// The extension is appended according to the export format, so the
/// default JPEG artifact is saved as `captured-photo-with-frame.jpg`.
pub const OUTPUT_FILE_STEM: &str = "captured-photo-with-frame";

/// Default overlay asset filename, looked up in the app data directory
/// and the working directory when no explicit path is configured.
pub const DEFAULT_OVERLAY_FILENAME: &str = "frame-overlay.png";

/// Metadata attached to a share request
pub mod share {
    /// Title passed to the platform share target
    pub const TITLE: &str = "Check out this photo!";
    /// Body text passed to the platform share target
    pub const TEXT: &str = "Here is a cool photo I took!";
}

/// JPEG encoding quality presets
///
/// Users can choose between quality and file size trade-offs. PNG export
/// is lossless and ignores the preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityPreset {
    /// High compression, smaller files
    Low,
    /// Balanced quality and file size
    Medium,
    /// Low compression, near-lossless (default)
    #[default]
    High,
    /// Minimal compression, largest files
    Maximum,
}

impl QualityPreset {
    /// Get all preset variants for iteration
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
        QualityPreset::Maximum,
    ];

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
            QualityPreset::Maximum => "Maximum",
        }
    }

    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 80,
            QualityPreset::High => 92,
            QualityPreset::Maximum => 98,
        }
    }
}

impl std::str::FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            "maximum" | "max" => Ok(QualityPreset::Maximum),
            other => Err(format!("Unknown quality preset: {}", other)),
        }
    }
}

/// Timing constants for camera capture
pub mod timing {
    use std::time::Duration;

    /// Time to let the camera stream stabilize before trusting a frame
    pub const CAPTURE_WARMUP: Duration = Duration::from_millis(500);

    /// Deadline for the first usable frame after stream start
    pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Poll interval while waiting for a frame (about one 60fps frame)
    pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Deadline for the GStreamer pipeline to reach its ready state
    pub const PIPELINE_READY_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Recognized file formats for overlay and file-source assets
pub mod file_formats {
    /// Check if a lowercase extension is a decodable image format
    pub fn is_image_extension(extension: &str) -> bool {
        matches!(extension, "png" | "jpg" | "jpeg" | "webp" | "bmp" | "gif")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_preset_display_names() {
        for preset in QualityPreset::ALL {
            assert!(!preset.display_name().is_empty());
        }
    }

    #[test]
    fn test_quality_preset_parse() {
        assert_eq!("medium".parse::<QualityPreset>(), Ok(QualityPreset::Medium));
        assert_eq!("MAX".parse::<QualityPreset>(), Ok(QualityPreset::Maximum));
        assert!("ultra".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn test_image_extensions() {
        assert!(file_formats::is_image_extension("png"));
        assert!(file_formats::is_image_extension("jpeg"));
        assert!(!file_formats::is_image_extension("mp4"));
        assert!(!file_formats::is_image_extension(""));
    }
}
