// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot + overlay compositing
//!
//! Owns the composite surface: an RGBA raster sized to the snapshot.
//! Compositing is all-or-nothing; a failed load never disturbs the
//! previous surface content.

use crate::errors::{AssetError, BoothError, BoothResult};
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Composite surface holder
///
/// Two fixed layers, painter's-algorithm: the decoded snapshot as base,
/// the overlay stretched to the snapshot's exact dimensions on top
/// (source-over, transparent overlay regions keep the snapshot visible).
pub struct Compositor {
    surface: Option<RgbaImage>,
}

impl Compositor {
    pub fn new() -> Self {
        Self { surface: None }
    }

    /// The current surface, if a composite has succeeded
    pub fn surface(&self) -> Option<&RgbaImage> {
        self.surface.as_ref()
    }

    /// Pixel dimensions of the current surface
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|s| s.dimensions())
    }

    /// Drop the surface (session discard)
    pub fn clear(&mut self) {
        self.surface = None;
    }

    /// Composite the snapshot under the overlay asset
    ///
    /// Both images must decode successfully before anything is drawn; on
    /// any failure the previous surface is left untouched. On success the
    /// surface is recreated at the snapshot's dimensions, so repeated
    /// composites of identical inputs produce byte-identical surfaces.
    pub async fn composite(
        &mut self,
        snapshot: Arc<[u8]>,
        overlay_path: &Path,
    ) -> BoothResult<()> {
        let overlay_path: PathBuf = overlay_path.to_path_buf();

        let surface = tokio::task::spawn_blocking(move || {
            let base = image::load_from_memory(&snapshot)
                .map_err(|e| AssetError::Decode(e.to_string()))?;
            let overlay = image::open(&overlay_path).map_err(|e| AssetError::Load {
                path: overlay_path.display().to_string(),
                reason: e.to_string(),
            })?;

            let mut surface = base.to_rgba8();
            let (width, height) = surface.dimensions();

            // Overlay is stretched to the snapshot, never the reverse
            let overlay = image::imageops::resize(
                &overlay.to_rgba8(),
                width,
                height,
                FilterType::Triangle,
            );
            image::imageops::overlay(&mut surface, &overlay, 0, 0);

            debug!(width, height, "Composite drawn");
            Ok::<RgbaImage, AssetError>(surface)
        })
        .await
        .map_err(|e| BoothError::Other(format!("Compositing task error: {}", e)))??;

        info!(
            width = surface.width(),
            height = surface.height(),
            "Composite surface updated"
        );
        self.surface = Some(surface);
        Ok(())
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}
