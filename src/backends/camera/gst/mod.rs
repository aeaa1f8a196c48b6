// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer camera backend

pub mod enumeration;
pub mod pipeline;

use super::types::*;
use super::CameraBackend;
use pipeline::CameraPipeline;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

/// Camera backend built on GStreamer (pipewiresrc / v4l2src)
pub struct GstBackend {
    pipeline: Option<CameraPipeline>,
    current_device: Option<CameraDevice>,
    current_format: Option<CameraFormat>,
    /// Formats discovered during enumeration, keyed by device path
    format_cache: Mutex<HashMap<String, Vec<CameraFormat>>>,
}

impl GstBackend {
    pub fn new() -> Self {
        Self {
            pipeline: None,
            current_device: None,
            current_format: None,
            format_cache: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for GstBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for GstBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        match enumeration::enumerate_devices() {
            Ok(cameras) => {
                if let Ok(mut cache) = self.format_cache.lock() {
                    for (device, formats) in &cameras {
                        cache.insert(device.path.clone(), formats.clone());
                    }
                }
                cameras.into_iter().map(|(device, _)| device).collect()
            }
            Err(e) => {
                warn!(error = %e, "Camera enumeration failed");
                Vec::new()
            }
        }
    }

    fn get_formats(&self, device: &CameraDevice) -> Vec<CameraFormat> {
        if let Ok(cache) = self.format_cache.lock()
            && let Some(formats) = cache.get(&device.path)
        {
            return formats.clone();
        }
        // Cache miss: re-run enumeration for this device
        enumeration::enumerate_devices()
            .ok()
            .and_then(|cameras| {
                cameras
                    .into_iter()
                    .find(|(d, _)| d.path == device.path)
                    .map(|(_, formats)| formats)
            })
            .unwrap_or_default()
    }

    fn initialize(&mut self, device: &CameraDevice, format: &CameraFormat) -> BackendResult<()> {
        info!(device = %device.name, format = %format, "Initializing GStreamer backend");

        self.pipeline = Some(CameraPipeline::new(device, format)?);
        self.current_device = Some(device.clone());
        self.current_format = Some(format.clone());
        Ok(())
    }

    fn shutdown(&mut self) -> BackendResult<()> {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.stop();
        }
        self.current_device = None;
        self.current_format = None;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.pipeline.is_some()
    }

    fn capture_photo(&self) -> BackendResult<CameraFrame> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| BackendError::InitializationFailed("Backend not initialized".into()))?;

        pipeline.latest_frame().ok_or(BackendError::NoFrameAvailable)
    }

    fn is_available(&self) -> bool {
        if gstreamer::init().is_err() {
            return false;
        }
        gstreamer::ElementFactory::find("pipewiresrc").is_some()
            || gstreamer::ElementFactory::find("v4l2src").is_some()
    }

    fn current_device(&self) -> Option<&CameraDevice> {
        self.current_device.as_ref()
    }

    fn current_format(&self) -> Option<&CameraFormat> {
        self.current_format.as_ref()
    }
}
