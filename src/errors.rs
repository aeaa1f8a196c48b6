// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the booth application

use std::fmt;

/// Result type alias using BoothError
pub type BoothResult<T> = Result<T, BoothError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum BoothError {
    /// Camera and stream errors
    Camera(CameraError),
    /// Overlay or snapshot asset loading errors
    Asset(AssetError),
    /// Artifact encoding errors
    Encoding(EncodingError),
    /// Share handoff errors
    Share(ShareError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No camera device available or stream missing
    DeviceUnavailable(String),
    /// The stream yielded no frame before the deadline
    NoFrame,
    /// Camera initialization failed
    InitializationFailed(String),
    /// Backend error (e.g., GStreamer)
    Backend(String),
}

/// Asset loading errors (snapshot or overlay)
#[derive(Debug, Clone)]
pub enum AssetError {
    /// Asset file could not be read or decoded
    Load { path: String, reason: String },
    /// Held snapshot bytes failed to decode
    Decode(String),
}

/// Artifact encoding errors
#[derive(Debug, Clone)]
pub enum EncodingError {
    /// Surface-to-buffer export failed
    Encode(String),
    /// Background encoding task failed
    Task(String),
}

/// Share handoff errors
#[derive(Debug, Clone)]
pub enum ShareError {
    /// The platform has no sharing capability; callers should offer
    /// a download instead
    Unsupported,
    /// The share target reported a failure
    Failed(String),
}

impl fmt::Display for BoothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoothError::Camera(e) => write!(f, "Camera error: {}", e),
            BoothError::Asset(e) => write!(f, "Asset error: {}", e),
            BoothError::Encoding(e) => write!(f, "Encoding error: {}", e),
            BoothError::Share(e) => write!(f, "Share error: {}", e),
            BoothError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BoothError::Storage(msg) => write!(f, "Storage error: {}", msg),
            BoothError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            CameraError::NoFrame => write!(f, "No frame available for capture"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Load { path, reason } => {
                write!(f, "Failed to load image at {}: {}", path, reason)
            }
            AssetError::Decode(msg) => write!(f, "Snapshot decode failed: {}", msg),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::Encode(msg) => write!(f, "Encoding failed: {}", msg),
            EncodingError::Task(msg) => write!(f, "Encoding task error: {}", msg),
        }
    }
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Unsupported => write!(f, "Sharing not supported on this platform"),
            ShareError::Failed(msg) => write!(f, "Share failed: {}", msg),
        }
    }
}

impl std::error::Error for BoothError {}
impl std::error::Error for CameraError {}
impl std::error::Error for AssetError {}
impl std::error::Error for EncodingError {}
impl std::error::Error for ShareError {}

// Conversions from sub-errors to BoothError
impl From<CameraError> for BoothError {
    fn from(err: CameraError) -> Self {
        BoothError::Camera(err)
    }
}

impl From<AssetError> for BoothError {
    fn from(err: AssetError) -> Self {
        BoothError::Asset(err)
    }
}

impl From<EncodingError> for BoothError {
    fn from(err: EncodingError) -> Self {
        BoothError::Encoding(err)
    }
}

impl From<ShareError> for BoothError {
    fn from(err: ShareError) -> Self {
        BoothError::Share(err)
    }
}

impl From<crate::backends::camera::BackendError> for BoothError {
    fn from(err: crate::backends::camera::BackendError) -> Self {
        use crate::backends::camera::BackendError;
        match err {
            BackendError::NotAvailable(msg) | BackendError::DeviceNotFound(msg) => {
                BoothError::Camera(CameraError::DeviceUnavailable(msg))
            }
            BackendError::InitializationFailed(msg) => {
                BoothError::Camera(CameraError::InitializationFailed(msg))
            }
            BackendError::NoFrameAvailable => BoothError::Camera(CameraError::NoFrame),
            other => BoothError::Camera(CameraError::Backend(other.to_string())),
        }
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for BoothError {
    fn from(err: std::io::Error) -> Self {
        BoothError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoothError::from(ShareError::Unsupported);
        assert_eq!(
            err.to_string(),
            "Share error: Sharing not supported on this platform"
        );

        let err = BoothError::from(CameraError::NoFrame);
        assert!(err.to_string().contains("No frame available"));
    }
}
