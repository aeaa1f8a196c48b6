// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend lifecycle manager
//!
//! The manager provides:
//! - Backend lifecycle management (initialization, shutdown)
//! - Facing-aware device selection
//! - Thread-safe backend access

use super::types::*;
use super::{get_backend_for_type, CameraBackend, CameraBackendType};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Internal manager state
struct ManagerState {
    /// The active backend instance
    backend: Box<dyn CameraBackend>,
    /// Backend type
    backend_type: CameraBackendType,
}

/// Camera backend manager
///
/// Manages backend lifecycle. Thread-safe and can be shared across threads.
#[derive(Clone)]
pub struct CameraBackendManager {
    state: Arc<Mutex<ManagerState>>,
}

impl CameraBackendManager {
    /// Create a new backend manager
    pub fn new(backend_type: CameraBackendType) -> Self {
        info!(backend = %backend_type, "Creating camera backend manager");

        Self::from_backend(get_backend_for_type(backend_type), backend_type)
    }

    /// Create a manager around a specific backend instance.
    ///
    /// Used for file sources and tests, where the backend is constructed
    /// directly rather than through the type registry.
    pub fn with_backend(backend: Box<dyn CameraBackend>) -> Self {
        Self::from_backend(backend, CameraBackendType::default())
    }

    fn from_backend(backend: Box<dyn CameraBackend>, backend_type: CameraBackendType) -> Self {
        let state = ManagerState {
            backend,
            backend_type,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Get the backend type
    pub fn backend_type(&self) -> CameraBackendType {
        self.state.lock().unwrap().backend_type
    }

    /// Check if the backend is available on this system
    pub fn is_available(&self) -> bool {
        self.state.lock().unwrap().backend.is_available()
    }

    /// Enumerate available cameras
    pub fn enumerate_cameras(&self) -> BackendResult<Vec<CameraDevice>> {
        let state = self.state.lock().unwrap();

        let cameras = state.backend.enumerate_cameras();
        if cameras.is_empty() {
            Err(BackendError::DeviceNotFound("No cameras found".to_string()))
        } else {
            Ok(cameras)
        }
    }

    /// Select a device matching the facing preference.
    ///
    /// Prefers a device whose location/name hints at the requested facing;
    /// falls back to the first available device so a single external webcam
    /// still works regardless of the preference.
    pub fn select_device(&self, facing: CameraFacing) -> BackendResult<CameraDevice> {
        let cameras = self.enumerate_cameras()?;
        let device = cameras
            .iter()
            .find(|d| d.facing_hint() == Some(facing))
            .or_else(|| cameras.first())
            .cloned()
            .ok_or_else(|| BackendError::DeviceNotFound("No cameras found".to_string()))?;

        info!(device = %device.name, facing = %facing, "Selected camera");
        Ok(device)
    }

    /// Get supported formats for a camera
    pub fn get_formats(&self, device: &CameraDevice) -> Vec<CameraFormat> {
        let state = self.state.lock().unwrap();
        state.backend.get_formats(device)
    }

    /// Select the best still-capture format for a device (highest resolution),
    /// with a sane default when the backend reports none.
    pub fn best_photo_format(&self, device: &CameraDevice) -> CameraFormat {
        self.get_formats(device)
            .into_iter()
            .max_by_key(|f| f.width * f.height)
            .unwrap_or(CameraFormat {
                width: 1280,
                height: 720,
                framerate: None,
                pixel_format: "RGBA".to_string(),
            })
    }

    /// Initialize the backend
    pub fn initialize(&self, device: &CameraDevice, format: &CameraFormat) -> BackendResult<()> {
        info!(device = %device.name, format = %format, "Initializing backend");

        let mut state = self.state.lock().unwrap();
        state.backend.initialize(device, format)
    }

    /// Shutdown the backend
    pub fn shutdown(&self) -> BackendResult<()> {
        info!("Shutting down backend");

        let mut state = self.state.lock().unwrap();
        state.backend.shutdown()
    }

    /// Check if initialized
    pub fn is_initialized(&self) -> bool {
        self.state.lock().unwrap().backend.is_initialized()
    }

    /// Capture a single frame
    pub fn capture_photo(&self) -> BackendResult<CameraFrame> {
        let state = self.state.lock().unwrap();
        state.backend.capture_photo()
    }

    /// Get current device
    pub fn current_device(&self) -> Option<CameraDevice> {
        self.state.lock().unwrap().backend.current_device().cloned()
    }

    /// Get current format
    pub fn current_format(&self) -> Option<CameraFormat> {
        self.state.lock().unwrap().backend.current_format().cloned()
    }
}

impl std::fmt::Debug for CameraBackendManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("CameraBackendManager")
            .field("backend_type", &state.backend_type)
            .field("initialized", &state.backend.is_initialized())
            .finish()
    }
}
