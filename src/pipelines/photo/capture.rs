// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture from the camera backend
//!
//! Handles pulling a single frame from the backend without interrupting
//! the stream, including the warm-up wait after stream start.

use crate::backends::camera::types::{BackendError, CameraFrame, PixelFormat};
use crate::backends::camera::CameraBackendManager;
use crate::constants::timing;
use crate::errors::CameraError;
use image::RgbaImage;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Capture a photo from the camera backend
    ///
    /// Polls for a frame until the warm-up period has passed, so the first
    /// auto-exposure frames after stream start are not used. Gives up after
    /// the capture timeout.
    ///
    /// # Returns
    /// * `Ok(Arc<CameraFrame>)` - captured frame (zero-copy via Arc)
    /// * `Err(CameraError::DeviceUnavailable)` - backend has no active stream
    /// * `Err(CameraError::NoFrame)` - no frame before the deadline
    pub async fn capture_from_backend(
        manager: &CameraBackendManager,
    ) -> Result<Arc<CameraFrame>, CameraError> {
        // A dead stream never delivers; don't wait out the deadline for it
        if !manager.is_initialized() {
            return Err(CameraError::DeviceUnavailable(
                "Camera stream not started".to_string(),
            ));
        }

        info!("Capturing photo from camera backend");

        let started = Instant::now();
        let mut frame: Option<CameraFrame> = None;

        while started.elapsed() < timing::CAPTURE_TIMEOUT {
            match manager.capture_photo() {
                Ok(f) => {
                    frame = Some(f);
                    if started.elapsed() >= timing::CAPTURE_WARMUP {
                        break;
                    }
                }
                Err(BackendError::NoFrameAvailable) => {}
                Err(e) => return Err(CameraError::Backend(e.to_string())),
            }
            tokio::time::sleep(timing::FRAME_POLL_INTERVAL).await;
        }

        let frame = frame.ok_or(CameraError::NoFrame)?;
        debug!(
            width = frame.width,
            height = frame.height,
            "Frame captured from backend"
        );

        Ok(Arc::new(frame))
    }

    /// Wrap an already-held frame for the pipeline
    pub fn capture_from_frame(frame: CameraFrame) -> Arc<CameraFrame> {
        debug!(
            width = frame.width,
            height = frame.height,
            "Using provided frame for photo"
        );
        Arc::new(frame)
    }

    /// Convert a frame into an owned RGBA image, stripping row padding
    pub fn frame_to_image(frame: &CameraFrame) -> Result<RgbaImage, CameraError> {
        if frame.format != PixelFormat::RGBA {
            return Err(CameraError::Backend(format!(
                "Unexpected frame format: {:?}",
                frame.format
            )));
        }

        let row_bytes = (frame.width * 4) as usize;
        let stride = frame.stride as usize;
        let expected = stride * frame.height as usize;
        if frame.data.len() < expected {
            return Err(CameraError::Backend(format!(
                "Frame data too small: expected {}, got {}",
                expected,
                frame.data.len()
            )));
        }

        let pixels = if stride == row_bytes {
            frame.data[..row_bytes * frame.height as usize].to_vec()
        } else {
            let mut pixels = Vec::with_capacity(row_bytes * frame.height as usize);
            for row in 0..frame.height as usize {
                let start = row * stride;
                pixels.extend_from_slice(&frame.data[start..start + row_bytes]);
            }
            pixels
        };

        RgbaImage::from_raw(frame.width, frame.height, pixels)
            .ok_or_else(|| CameraError::Backend("Failed to build image from frame".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, stride: u32) -> CameraFrame {
        CameraFrame {
            width,
            height,
            data: Arc::from(vec![128u8; (stride * height) as usize].into_boxed_slice()),
            format: PixelFormat::RGBA,
            stride,
            captured_at: Instant::now(),
        }
    }

    #[tokio::test]
    async fn test_capture_without_active_stream_fails_fast() {
        use crate::backends::camera::file_source::FileBackend;

        let manager =
            CameraBackendManager::with_backend(Box::new(FileBackend::new("missing.png")));
        let started = Instant::now();
        let result = PhotoCapture::capture_from_backend(&manager).await;

        assert!(matches!(result, Err(CameraError::DeviceUnavailable(_))));
        // Must not wait out the capture deadline on a stream that never started
        assert!(started.elapsed() < timing::CAPTURE_TIMEOUT);
    }

    #[test]
    fn test_capture_from_frame() {
        let captured = PhotoCapture::capture_from_frame(frame(1920, 1080, 1920 * 4));
        assert_eq!(captured.width, 1920);
        assert_eq!(captured.height, 1080);
    }

    #[test]
    fn test_frame_to_image_tight_stride() {
        let image = PhotoCapture::frame_to_image(&frame(64, 32, 64 * 4)).unwrap();
        assert_eq!(image.dimensions(), (64, 32));
    }

    #[test]
    fn test_frame_to_image_padded_stride() {
        // Stride wider than the row: padding must be stripped
        let image = PhotoCapture::frame_to_image(&frame(60, 32, 64 * 4)).unwrap();
        assert_eq!(image.dimensions(), (60, 32));
    }

    #[test]
    fn test_frame_to_image_truncated_data() {
        let mut bad = frame(64, 32, 64 * 4);
        bad.data = Arc::from(vec![0u8; 16].into_boxed_slice());
        assert!(PhotoCapture::frame_to_image(&bad).is_err());
    }
}
