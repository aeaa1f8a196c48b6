// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Camera facing preference
///
/// Toggled by user action; the value affects only the next stream
/// acquisition, never an already-captured snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    /// User-facing camera (selfie)
    #[default]
    Front,
    /// World-facing camera
    Rear,
}

impl CameraFacing {
    /// The opposite facing value
    pub fn toggled(&self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Rear,
            CameraFacing::Rear => CameraFacing::Front,
        }
    }
}

impl std::fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraFacing::Front => write!(f, "front"),
            CameraFacing::Rear => write!(f, "rear"),
        }
    }
}

impl std::str::FromStr for CameraFacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" | "user" => Ok(CameraFacing::Front),
            "rear" | "back" | "environment" => Ok(CameraFacing::Rear),
            other => Err(format!("Unknown facing: {}", other)),
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone)]
pub struct CameraDevice {
    /// Human-readable device name
    pub name: String,
    /// Backend-specific device path (PipeWire node, /dev/video*, file path)
    pub path: String,
    /// Camera location metadata when reported: "front", "back" or "external"
    pub location: Option<String>,
}

impl CameraDevice {
    /// Infer the facing of this device from its location metadata,
    /// falling back to name heuristics. `None` when undecidable.
    pub fn facing_hint(&self) -> Option<CameraFacing> {
        if let Some(location) = &self.location {
            return match location.as_str() {
                "front" => Some(CameraFacing::Front),
                "back" | "rear" => Some(CameraFacing::Rear),
                _ => None,
            };
        }

        let name = self.name.to_ascii_lowercase();
        if name.contains("front") || name.contains("integrated") {
            Some(CameraFacing::Front)
        } else if name.contains("rear") || name.contains("back") {
            Some(CameraFacing::Rear)
        } else {
            None
        }
    }
}

/// Framerate as a fraction (numerator/denominator)
///
/// Stores exact framerate to handle NTSC rates like 59.94fps (60000/1001)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Framerate {
    pub num: u32,
    pub denom: u32,
}

impl Framerate {
    /// Create a new framerate from numerator and denominator
    pub fn new(num: u32, denom: u32) -> Self {
        Self {
            num,
            denom: if denom == 0 { 1 } else { denom },
        }
    }

    /// Create a framerate from an integer (e.g., 30 becomes 30/1)
    pub fn from_int(fps: u32) -> Self {
        Self { num: fps, denom: 1 }
    }

    /// Get the rounded integer framerate
    pub fn as_int(&self) -> u32 {
        self.num / self.denom
    }

    /// Format as GStreamer fraction string (e.g., "60000/1001")
    pub fn as_gst_fraction(&self) -> String {
        format!("{}/{}", self.num, self.denom)
    }
}

impl std::fmt::Display for Framerate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denom != 1 {
            write!(f, "{:.2}", self.num as f64 / self.denom as f64)
        } else {
            write!(f, "{}", self.num)
        }
    }
}

impl Default for Framerate {
    fn default() -> Self {
        Self { num: 30, denom: 1 }
    }
}

/// Camera format specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
    /// None for still capture
    pub framerate: Option<Framerate>,
    /// FourCC or caps name (e.g., "RGBA", "YUY2", "MJPG")
    pub pixel_format: String,
}

impl std::fmt::Display for CameraFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(fps) = &self.framerate {
            write!(f, "{}x{} @ {}fps", self.width, self.height, fps)
        } else {
            write!(f, "{}x{}", self.width, self.height)
        }
    }
}

/// Pixel format for camera frames
///
/// The capture pipeline converts everything to RGBA before frames leave
/// the backend; the other variants exist for caps negotiation and
/// format listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// RGBA - canonical in-memory format (4 bytes per pixel)
    RGBA,
    /// RGB24 - 24-bit RGB without alpha
    RGB24,
    /// YUYV - packed 4:2:2, common raw webcam format
    YUYV,
}

impl PixelFormat {
    /// Bytes per pixel for the format
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::RGBA => 4,
            PixelFormat::RGB24 => 3,
            PixelFormat::YUYV => 2,
        }
    }

    /// GStreamer video/x-raw format string
    pub fn to_gst_format_string(&self) -> &'static str {
        match self {
            PixelFormat::RGBA => "RGBA",
            PixelFormat::RGB24 => "RGB",
            PixelFormat::YUYV => "YUY2",
        }
    }
}

/// A single frame from the camera, always RGBA
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, shared without copying
    pub data: Arc<[u8]>,
    /// Pixel format of `data` (RGBA for all backend output)
    pub format: PixelFormat,
    /// Row stride in bytes
    pub stride: u32,
    /// Timestamp when the frame was captured (latency diagnostics)
    pub captured_at: Instant,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Failed to initialize backend
    InitializationFailed(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// Format not supported
    FormatNotSupported(String),
    /// Backend initialized but no frame delivered yet
    NoFrameAvailable,
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::FormatNotSupported(msg) => write!(f, "Format not supported: {}", msg),
            BackendError::NoFrameAvailable => write!(f, "No frame available"),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
