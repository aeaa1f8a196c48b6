// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! Trait-based abstraction over frame sources. The session talks to a
//! [`CameraBackendManager`], which owns one concrete [`CameraBackend`]:
//!
//! ```text
//! ┌─────────────────────┐
//! │   CaptureSession    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackendManager│  ← lifecycle, device selection
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend trait│
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴──────┐
//!      ▼            ▼
//! ┌─────────┐ ┌───────────┐
//! │GStreamer│ │File source│
//! └─────────┘ └───────────┘
//! ```

pub mod file_source;
pub mod gst;
pub mod manager;
pub mod types;

pub use manager::CameraBackendManager;
pub use types::*;

/// Camera backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CameraBackendType {
    /// GStreamer backend (pipewiresrc with v4l2src fallback)
    #[default]
    GStreamer,
}

impl std::fmt::Display for CameraBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraBackendType::GStreamer => write!(f, "GStreamer"),
        }
    }
}

/// Camera backend trait
///
/// All frame sources implement this trait to provide device enumeration,
/// lifecycle management and single-frame capture.
pub trait CameraBackend: Send + Sync {
    /// Enumerate available camera devices on this backend
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Get supported formats for a specific camera device
    fn get_formats(&self, device: &CameraDevice) -> Vec<CameraFormat>;

    /// Initialize the backend with a specific camera and format
    ///
    /// This starts the stream and prepares for capture. Must be called
    /// before [`CameraBackend::capture_photo`].
    fn initialize(&mut self, device: &CameraDevice, format: &CameraFormat) -> BackendResult<()>;

    /// Shutdown the backend and release the camera
    ///
    /// After shutdown the backend must be reinitialized before use.
    fn shutdown(&mut self) -> BackendResult<()>;

    /// Check if the backend is currently initialized
    fn is_initialized(&self) -> bool;

    /// Capture a single frame from the active stream
    ///
    /// The frame data is copied immediately so the stream is not blocked.
    /// Output is always RGBA.
    ///
    /// # Returns
    /// * `Ok(CameraFrame)` - frame captured successfully
    /// * `Err(BackendError::NoFrameAvailable)` - stream has not delivered yet
    fn capture_photo(&self) -> BackendResult<CameraFrame>;

    /// Check if this backend is available on the current system
    fn is_available(&self) -> bool;

    /// Get the currently active camera device (if initialized)
    fn current_device(&self) -> Option<&CameraDevice>;

    /// Get the currently active format (if initialized)
    fn current_format(&self) -> Option<&CameraFormat>;
}

/// Get a concrete backend instance for the given type
pub fn get_backend_for_type(backend_type: CameraBackendType) -> Box<dyn CameraBackend> {
    match backend_type {
        CameraBackendType::GStreamer => Box::new(gst::GstBackend::new()),
    }
}
