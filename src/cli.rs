// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the photo booth
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Running the capture/composite/export booth flow

use framebooth::backends::camera::file_source::FileBackend;
use framebooth::backends::camera::gst::enumeration::enumerate_devices;
use framebooth::backends::camera::CameraBackendType;
use framebooth::errors::{BoothError, ShareError};
use framebooth::{CameraBackendManager, CaptureSession, Config, EncodingFormat};
use std::path::PathBuf;

/// Arguments for the booth capture flow
pub struct BoothArgs {
    pub facing: Option<String>,
    pub overlay: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub quality: Option<String>,
    pub share: bool,
    pub from_file: Option<PathBuf>,
}

/// List all available cameras with their formats
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = enumerate_devices().unwrap_or_default();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, (camera, formats)) in cameras.iter().enumerate() {
        println!("  [{}] {}", index, camera.name);
        if let Some(location) = &camera.location {
            println!("      Location: {}", location);
        }

        if !formats.is_empty() {
            // Group formats by resolution and show best framerate
            let mut resolutions: Vec<(u32, u32, u32)> = Vec::new();
            for format in formats {
                let fps = format.framerate.map(|f| f.as_int()).unwrap_or(30);
                if let Some(existing) = resolutions
                    .iter_mut()
                    .find(|(w, h, _)| *w == format.width && *h == format.height)
                {
                    if fps > existing.2 {
                        existing.2 = fps;
                    }
                } else {
                    resolutions.push((format.width, format.height, fps));
                }
            }

            // Sort by resolution (highest first), show top 3
            resolutions.sort_by(|a, b| (b.0 * b.1).cmp(&(a.0 * a.1)));
            let res_strs: Vec<String> = resolutions
                .iter()
                .take(3)
                .map(|(w, h, fps)| format!("{}x{}@{}fps", w, h, fps))
                .collect();

            println!("      Formats: {}", res_strs.join(", "));
        }
        println!();
    }

    Ok(())
}

/// Run the booth flow: capture, composite, export, then share or save
pub fn run_booth(args: BoothArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if let Some(facing) = args.facing.as_deref() {
        config.facing = facing.parse()?;
    }
    if let Some(overlay) = args.overlay {
        config.overlay_path = Some(overlay);
    }
    if let Some(output) = args.output {
        config.output_dir = Some(output);
    }
    if let Some(quality) = args.quality.as_deref() {
        config.quality = quality.parse()?;
    }

    let format: EncodingFormat = args.format.parse()?;

    let manager = match args.from_file {
        Some(path) => CameraBackendManager::with_backend(Box::new(FileBackend::new(path))),
        None => CameraBackendManager::new(CameraBackendType::GStreamer),
    };

    let mut session = CaptureSession::new(manager, &config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        session.start().await?;

        println!("Capturing...");
        session.capture().await?;

        println!("Compositing overlay...");
        session.composite().await?;

        let artifact = session.export_artifact(format).await?;
        println!(
            "Exported {} ({} bytes)",
            artifact.filename(),
            artifact.data.len()
        );

        if args.share {
            match session.share(&artifact).await {
                Ok(()) => {
                    println!("Shared via system handler.");
                    return Ok(());
                }
                Err(BoothError::Share(ShareError::Unsupported)) => {
                    println!("Sharing not supported on this platform, saving instead.");
                }
                Err(e) => return Err(e),
            }
        }

        let path = session.download(&artifact).await?;
        println!("Photo saved: {}", path.display());
        Ok::<(), BoothError>(())
    })?;

    session.stop();
    Ok(())
}
