// SPDX-License-Identifier: GPL-3.0-only

//! Capture session
//!
//! The booth's two-mode state machine. A session is either `Live` (camera
//! streaming, no image held) or `Captured` (one snapshot held in memory).
//! `capture` moves Live→Captured only when a frame was actually read;
//! `discard` moves Captured→Live unconditionally. Every failure leaves the
//! session in a well-defined mode and is recoverable by retrying the
//! triggering action.

use crate::backends::camera::{CameraBackendManager, CameraFacing};
use crate::config::Config;
use crate::errors::{BoothError, BoothResult, ShareError};
use crate::pipelines::photo::{Artifact, Compositor, EncodingFormat, PhotoCapture, PhotoEncoder};
use crate::share::{default_provider, ShareProvider, ShareRequest};
use crate::storage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Session mode, derived from whether a snapshot is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Camera streaming, no image held
    Live,
    /// A still image is held in memory
    Captured,
}

/// A single still image captured from the live camera feed,
/// held as JPEG bytes for the lifetime of the capture
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// Booth capture session
///
/// Exclusively owns the camera stream and the composite surface. The
/// stream is acquired by [`CaptureSession::start`] and released on
/// [`CaptureSession::stop`] or drop.
pub struct CaptureSession {
    manager: CameraBackendManager,
    /// Facing preference for the next stream acquisition
    facing: CameraFacing,
    /// Facing of the currently running stream, if any
    active_facing: Option<CameraFacing>,
    overlay_path: PathBuf,
    output_dir: PathBuf,
    mirror_front_capture: bool,
    snapshot: Option<Snapshot>,
    compositor: Compositor,
    encoder: PhotoEncoder,
    share_provider: Box<dyn ShareProvider>,
}

impl CaptureSession {
    /// Create a session around a backend manager, configured from `config`
    pub fn new(manager: CameraBackendManager, config: &Config) -> Self {
        let mut encoder = PhotoEncoder::new();
        encoder.set_quality(config.quality);

        Self {
            manager,
            facing: config.facing,
            active_facing: None,
            overlay_path: config.resolve_overlay_path(),
            output_dir: config.resolve_output_dir(),
            mirror_front_capture: config.mirror_front_capture,
            snapshot: None,
            compositor: Compositor::new(),
            encoder,
            share_provider: default_provider(),
        }
    }

    /// Replace the share provider (tests, headless platforms)
    pub fn with_share_provider(mut self, provider: Box<dyn ShareProvider>) -> Self {
        self.share_provider = provider;
        self
    }

    /// Current session mode
    pub fn mode(&self) -> SessionMode {
        if self.snapshot.is_some() {
            SessionMode::Captured
        } else {
            SessionMode::Live
        }
    }

    /// The held snapshot, if the session is in `Captured` mode
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Dimensions of the composite surface after a successful composite
    pub fn surface_dimensions(&self) -> Option<(u32, u32)> {
        self.compositor.dimensions()
    }

    /// Current facing preference
    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    /// Acquire the camera stream for the current facing preference
    pub async fn start(&mut self) -> BoothResult<()> {
        let device = self.manager.select_device(self.facing)?;
        let format = self.manager.best_photo_format(&device);
        self.manager.initialize(&device, &format)?;
        self.active_facing = Some(self.facing);
        info!(device = %device.name, format = %format, "Session live");
        Ok(())
    }

    /// Release the camera stream
    pub fn stop(&mut self) {
        let _ = self.manager.shutdown();
        self.active_facing = None;
    }

    /// Read one frame from the active stream and hold it as the snapshot
    ///
    /// Transitions the session to `Captured`. A previous snapshot is
    /// replaced, never appended. On failure nothing changes: no partial
    /// state, the session keeps its prior mode and snapshot.
    pub async fn capture(&mut self) -> BoothResult<()> {
        let frame = PhotoCapture::capture_from_backend(&self.manager).await?;
        let mut image = PhotoCapture::frame_to_image(&frame)?;

        // Mirroring follows the running stream's facing, not the toggled
        // preference, which only applies to the next acquisition
        if self.mirror_front_capture && self.active_facing == Some(CameraFacing::Front) {
            image = image::imageops::flip_horizontal(&image);
        }

        let (width, height) = image.dimensions();
        let data = self.encoder.jpeg_bytes(image).await?;

        self.snapshot = Some(Snapshot {
            data: Arc::from(data.into_boxed_slice()),
            width,
            height,
        });
        info!(width, height, "Snapshot captured");
        Ok(())
    }

    /// Composite the held snapshot under the overlay asset
    ///
    /// Requires `Captured` mode. Loads both images, all-or-nothing; on
    /// failure any previous surface content remains untouched.
    pub async fn composite(&mut self) -> BoothResult<()> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| BoothError::Other("No snapshot to composite".to_string()))?;

        self.compositor
            .composite(Arc::clone(&snapshot.data), &self.overlay_path)
            .await
    }

    /// Serialize the composite surface into an encoded artifact
    pub async fn export_artifact(&self, format: EncodingFormat) -> BoothResult<Artifact> {
        let surface = self
            .compositor
            .surface()
            .ok_or_else(|| BoothError::Other("No composite surface to export".to_string()))?
            .clone();

        Ok(self.encoder.encode_as(surface, format).await?)
    }

    /// Hand the artifact to the platform share capability
    ///
    /// Availability is checked before the artifact is staged anywhere; an
    /// unsupported platform yields [`ShareError::Unsupported`] so the
    /// caller can offer a download instead.
    pub async fn share(&self, artifact: &Artifact) -> BoothResult<()> {
        if !self.share_provider.is_available() {
            return Err(ShareError::Unsupported.into());
        }

        let staged = storage::save_artifact_as(
            artifact,
            std::env::temp_dir(),
            artifact.filename(),
        )
        .await?;

        let request = ShareRequest::new(staged, artifact.filename(), artifact.mime_type());
        debug!(provider = self.share_provider.name(), "Sharing artifact");
        Ok(self.share_provider.share(&request)?)
    }

    /// Save the artifact under the fixed booth filename
    pub async fn download(&self, artifact: &Artifact) -> BoothResult<PathBuf> {
        storage::save_artifact(artifact, self.output_dir.clone()).await
    }

    /// Flip the camera facing preference
    ///
    /// Takes effect on the next stream acquisition; the held snapshot and
    /// any composite surface are unaffected.
    pub fn toggle_facing(&mut self) -> CameraFacing {
        self.facing = self.facing.toggled();
        info!(facing = %self.facing, "Facing toggled");
        self.facing
    }

    /// Drop the snapshot and composite surface, returning to `Live`
    ///
    /// Unconditional: a no-op in `Live` mode.
    pub fn discard(&mut self) {
        self.snapshot = None;
        self.compositor.clear();
        debug!("Snapshot discarded, session live");
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        let _ = self.manager.shutdown();
    }
}
