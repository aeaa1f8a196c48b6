// SPDX-License-Identifier: GPL-3.0-only

//! Artifact storage
//!
//! Saving is the booth's "download" path: the artifact is written under
//! its fixed filename into the output directory. A timestamped variant
//! exists for keeping multiple shots around.

use crate::errors::{BoothError, BoothResult};
use crate::pipelines::photo::Artifact;
use std::path::PathBuf;
use tracing::info;

/// Folder name under the user's pictures directory
const DEFAULT_SAVE_FOLDER: &str = "Framebooth";

/// Default output directory for saved artifacts
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DEFAULT_SAVE_FOLDER)
}

/// Timestamped filename for keeping multiple shots
/// (e.g., `booth_20260826_153012.jpg`)
pub fn timestamped_filename(extension: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("booth_{}.{}", timestamp, extension)
}

/// Save an artifact under its fixed booth filename
///
/// Creates the output directory if needed and overwrites a previous
/// artifact of the same format.
pub async fn save_artifact(artifact: &Artifact, output_dir: PathBuf) -> BoothResult<PathBuf> {
    save_artifact_as(artifact, output_dir, artifact.filename()).await
}

/// Save an artifact under an explicit filename
pub async fn save_artifact_as(
    artifact: &Artifact,
    output_dir: PathBuf,
    filename: String,
) -> BoothResult<PathBuf> {
    let filepath = output_dir.join(&filename);
    info!(path = %filepath.display(), "Saving artifact");

    let data = artifact.data.clone();
    let write_path = filepath.clone();
    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&output_dir)?;
        std::fs::write(&write_path, &data)
    })
    .await
    .map_err(|e| BoothError::Storage(format!("Save task error: {}", e)))??;

    info!(path = %filepath.display(), "Artifact saved");
    Ok(filepath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::EncodingFormat;

    fn artifact() -> Artifact {
        Artifact {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            format: EncodingFormat::Jpeg,
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_timestamped_filename_shape() {
        let name = timestamped_filename("jpg");
        assert!(name.starts_with("booth_"));
        assert!(name.ends_with(".jpg"));
        // booth_YYYYMMDD_HHMMSS.jpg
        assert_eq!(name.len(), "booth_20260826_153012.jpg".len());
    }

    #[tokio::test]
    async fn test_save_uses_fixed_filename() {
        let dir = std::env::temp_dir().join(format!("framebooth-save-{}", std::process::id()));
        let path = save_artifact(&artifact(), dir.clone()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "captured-photo-with-frame.jpg"
        );
        assert_eq!(std::fs::read(&path).unwrap(), artifact().data);

        std::fs::remove_dir_all(dir).ok();
    }
}
