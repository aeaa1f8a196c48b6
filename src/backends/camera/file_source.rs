// SPDX-License-Identifier: GPL-3.0-only

//! File-backed frame source
//!
//! Treats a still image file as a camera: `capture_photo` returns the
//! decoded image as an RGBA frame. Used by tests and by the CLI
//! `--from-file` option so the booth flow runs without camera hardware.

use super::types::*;
use super::CameraBackend;
use crate::constants::file_formats;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Decode an image file into an RGBA camera frame
pub fn load_image_as_frame(path: &Path) -> BackendResult<CameraFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !file_formats::is_image_extension(&extension) {
        return Err(BackendError::FormatNotSupported(format!(
            "Unsupported file format: {}",
            extension
        )));
    }

    let img = image::open(path).map_err(|e| BackendError::IoError(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    debug!(path = %path.display(), width, height, "Loaded image as frame");

    Ok(CameraFrame {
        width,
        height,
        data: Arc::from(rgba.into_raw().into_boxed_slice()),
        format: PixelFormat::RGBA,
        stride: width * 4,
        captured_at: Instant::now(),
    })
}

/// Camera backend that serves frames from a single image file
pub struct FileBackend {
    path: PathBuf,
    frame: Option<CameraFrame>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
        }
    }

    fn device(&self) -> CameraDevice {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        CameraDevice {
            name: format!("File source ({})", name),
            path: self.path.display().to_string(),
            location: None,
        }
    }
}

impl CameraBackend for FileBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        vec![self.device()]
    }

    fn get_formats(&self, _device: &CameraDevice) -> Vec<CameraFormat> {
        // Dimensions are only known once the file is decoded
        match &self.frame {
            Some(frame) => vec![CameraFormat {
                width: frame.width,
                height: frame.height,
                framerate: None,
                pixel_format: "RGBA".to_string(),
            }],
            None => Vec::new(),
        }
    }

    fn initialize(&mut self, _device: &CameraDevice, _format: &CameraFormat) -> BackendResult<()> {
        self.frame = Some(load_image_as_frame(&self.path)?);
        Ok(())
    }

    fn shutdown(&mut self) -> BackendResult<()> {
        self.frame = None;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.frame.is_some()
    }

    fn capture_photo(&self) -> BackendResult<CameraFrame> {
        self.frame.clone().ok_or(BackendError::NoFrameAvailable)
    }

    fn is_available(&self) -> bool {
        self.path.exists()
    }

    fn current_device(&self) -> Option<&CameraDevice> {
        None
    }

    fn current_format(&self) -> Option<&CameraFormat> {
        None
    }
}
