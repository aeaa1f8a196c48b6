// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the booth session flow
//!
//! Runs the full capture/composite/export/save path against a file-backed
//! camera, so no hardware or GStreamer runtime is needed.

use framebooth::backends::camera::file_source::FileBackend;
use framebooth::errors::{BoothError, CameraError, ShareError};
use framebooth::share::{ShareProvider, ShareRequest};
use framebooth::{
    CameraBackendManager, CaptureSession, Config, EncodingFormat, SessionMode,
};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn write_png(name: &str, width: u32, height: u32, pixel: [u8; 4]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "framebooth-it-{}-{}",
        std::process::id(),
        name
    ));
    RgbaImage::from_pixel(width, height, image::Rgba(pixel))
        .save(&path)
        .unwrap();
    path
}

fn booth_session(source: &Path, overlay: &Path, output: &Path) -> CaptureSession {
    let manager = CameraBackendManager::with_backend(Box::new(FileBackend::new(source)));
    let config = Config {
        overlay_path: Some(overlay.to_path_buf()),
        output_dir: Some(output.to_path_buf()),
        ..Config::default()
    };
    CaptureSession::new(manager, &config)
}

/// Share provider that records calls without touching the platform
struct RecordingShare {
    calls: Arc<AtomicUsize>,
}

impl ShareProvider for RecordingShare {
    fn is_available(&self) -> bool {
        true
    }

    fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        assert!(request.path.exists(), "artifact must be staged before share");
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Provider that reports no share capability
struct UnavailableShare;

impl ShareProvider for UnavailableShare {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        panic!("share must not be called when unavailable");
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

#[tokio::test]
async fn test_capture_transitions_to_captured() {
    let source = write_png("cap-src.png", 96, 64, [200, 120, 40, 255]);
    let overlay = write_png("cap-ovl.png", 16, 16, [0, 0, 0, 128]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output);

    assert_eq!(session.mode(), SessionMode::Live);
    session.start().await.unwrap();
    session.capture().await.unwrap();

    assert_eq!(session.mode(), SessionMode::Captured);
    let snapshot = session.snapshot().unwrap();
    assert_eq!((snapshot.width, snapshot.height), (96, 64));
    // Snapshots are held as encoded JPEG bytes
    assert_eq!(&snapshot.data[..2], &[0xFF, 0xD8]);

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_composite_surface_matches_snapshot_dimensions() {
    let source = write_png("dim-src.png", 120, 80, [50, 90, 130, 255]);
    // Overlay deliberately a different size; it is stretched to fit
    let overlay = write_png("dim-ovl.png", 30, 300, [255, 0, 0, 200]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output);

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();

    assert_eq!(session.surface_dimensions(), Some((120, 80)));

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_failed_composite_keeps_previous_surface() {
    let source = write_png("keep-src.png", 64, 64, [10, 200, 10, 255]);
    let overlay = write_png("keep-ovl.png", 8, 8, [0, 0, 255, 255]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output);

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();
    assert_eq!(session.surface_dimensions(), Some((64, 64)));

    // Remove the overlay so the next composite fails at asset load
    std::fs::remove_file(&overlay).unwrap();
    assert!(session.composite().await.is_err());
    assert_eq!(session.surface_dimensions(), Some((64, 64)));

    std::fs::remove_file(source).ok();
}

#[tokio::test]
async fn test_export_and_download_fixed_filename() {
    let source = write_png("dl-src.png", 48, 48, [180, 180, 40, 255]);
    let overlay = write_png("dl-ovl.png", 48, 48, [0, 0, 0, 60]);
    let output = std::env::temp_dir().join(format!(
        "framebooth-it-dl-{}",
        std::process::id()
    ));
    let mut session = booth_session(&source, &overlay, &output);

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();

    let artifact = session.export_artifact(EncodingFormat::Jpeg).await.unwrap();
    assert!(!artifact.data.is_empty());
    assert_eq!(artifact.filename(), "captured-photo-with-frame.jpg");

    let saved = session.download(&artifact).await.unwrap();
    assert_eq!(
        saved.file_name().unwrap().to_str().unwrap(),
        "captured-photo-with-frame.jpg"
    );
    assert!(saved.exists());

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
    std::fs::remove_dir_all(output).ok();
}

#[tokio::test]
async fn test_export_png_variant() {
    let source = write_png("png-src.png", 40, 30, [90, 40, 120, 255]);
    let overlay = write_png("png-ovl.png", 40, 30, [255, 255, 255, 30]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output);

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();

    let artifact = session.export_artifact(EncodingFormat::Png).await.unwrap();
    assert_eq!(artifact.filename(), "captured-photo-with-frame.png");
    assert_eq!(&artifact.data[1..4], b"PNG");

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_share_unsupported_platform() {
    let source = write_png("nosh-src.png", 32, 32, [20, 20, 20, 255]);
    let overlay = write_png("nosh-ovl.png", 32, 32, [200, 0, 0, 100]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output)
        .with_share_provider(Box::new(UnavailableShare));

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();
    let artifact = session.export_artifact(EncodingFormat::Jpeg).await.unwrap();

    match session.share(&artifact).await {
        Err(BoothError::Share(ShareError::Unsupported)) => {}
        other => panic!("Expected ShareError::Unsupported, got {:?}", other.err()),
    }

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_share_stages_artifact_for_provider() {
    let source = write_png("sh-src.png", 32, 32, [20, 120, 220, 255]);
    let overlay = write_png("sh-ovl.png", 32, 32, [0, 200, 0, 100]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let calls = Arc::new(AtomicUsize::new(0));
    let mut session = booth_session(&source, &overlay, &output).with_share_provider(Box::new(
        RecordingShare {
            calls: Arc::clone(&calls),
        },
    ));

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();
    let artifact = session.export_artifact(EncodingFormat::Jpeg).await.unwrap();

    session.share(&artifact).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_discard_returns_to_live() {
    let source = write_png("disc-src.png", 50, 50, [66, 66, 66, 255]);
    let overlay = write_png("disc-ovl.png", 50, 50, [0, 0, 0, 255]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output);

    session.start().await.unwrap();
    session.capture().await.unwrap();
    session.composite().await.unwrap();
    assert_eq!(session.mode(), SessionMode::Captured);

    session.discard();
    assert_eq!(session.mode(), SessionMode::Live);
    assert!(session.snapshot().is_none());
    assert!(session.surface_dimensions().is_none());

    // Discard in Live mode is a no-op, not an error
    session.discard();
    assert_eq!(session.mode(), SessionMode::Live);

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_recapture_replaces_snapshot() {
    let source = write_png("re-src.png", 44, 44, [1, 2, 3, 255]);
    let overlay = write_png("re-ovl.png", 44, 44, [9, 9, 9, 255]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&source, &overlay, &output);

    session.start().await.unwrap();
    session.capture().await.unwrap();
    let first = Arc::clone(&session.snapshot().unwrap().data);

    session.capture().await.unwrap();
    assert_eq!(session.mode(), SessionMode::Captured);
    // One snapshot held, never appended
    assert!(!Arc::ptr_eq(&first, &session.snapshot().unwrap().data));

    std::fs::remove_file(source).ok();
    std::fs::remove_file(overlay).ok();
}

#[tokio::test]
async fn test_failed_capture_leaves_session_unchanged() {
    let missing = std::env::temp_dir().join("framebooth-it-does-not-exist.png");
    let overlay = write_png("fail-ovl.png", 16, 16, [0, 0, 0, 255]);
    let output = std::env::temp_dir().join(format!("framebooth-it-out-{}", std::process::id()));
    let mut session = booth_session(&missing, &overlay, &output);

    // Initialization decodes the file, which does not exist
    assert!(session.start().await.is_err());
    // With no active stream, capture fails fast instead of waiting out
    // the frame deadline
    assert!(matches!(
        session.capture().await,
        Err(BoothError::Camera(CameraError::DeviceUnavailable(_)))
    ));
    assert_eq!(session.mode(), SessionMode::Live);
    assert!(session.snapshot().is_none());

    std::fs::remove_file(overlay).ok();
}
