// SPDX-License-Identifier: GPL-3.0-only

//! Async photo encoding
//!
//! Flattens the composite surface into an encoded artifact:
//! - JPEG (with quality presets)
//! - PNG (lossless)
//!
//! Encoding is deterministic: identical pixels and settings always yield
//! byte-identical output.

use crate::constants::{QualityPreset, OUTPUT_FILE_STEM};
use crate::errors::EncodingError;
use image::RgbaImage;
use tracing::{debug, info};

/// Supported artifact formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression, default booth output)
    #[default]
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }

    /// Get MIME type for share metadata
    pub fn mime_type(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "image/jpeg",
            EncodingFormat::Png => "image/png",
        }
    }
}

impl std::str::FromStr for EncodingFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(EncodingFormat::Jpeg),
            "png" => Ok(EncodingFormat::Png),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

/// Encoded image buffer ready for sharing or saving
#[derive(Debug, Clone)]
pub struct Artifact {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

impl Artifact {
    /// Fixed booth output filename for this artifact's format
    pub fn filename(&self) -> String {
        format!("{}.{}", OUTPUT_FILE_STEM, self.format.extension())
    }

    /// MIME type for share metadata
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Photo encoder
pub struct PhotoEncoder {
    quality: QualityPreset,
}

impl PhotoEncoder {
    /// Create a new encoder with high quality
    pub fn new() -> Self {
        Self {
            quality: QualityPreset::High,
        }
    }

    /// Set encoding quality (only affects JPEG)
    pub fn set_quality(&mut self, quality: QualityPreset) {
        self.quality = quality;
    }

    /// Encode a surface into an artifact asynchronously
    ///
    /// Runs the encoding in a blocking task to avoid stalling the runtime.
    pub async fn encode_as(
        &self,
        surface: RgbaImage,
        format: EncodingFormat,
    ) -> Result<Artifact, EncodingError> {
        let (width, height) = surface.dimensions();
        info!(width, height, format = ?format, "Starting encoding");

        let quality = self.quality;
        let data = tokio::task::spawn_blocking(move || match format {
            EncodingFormat::Jpeg => encode_jpeg(&surface, quality.jpeg_quality()),
            EncodingFormat::Png => encode_png(&surface),
        })
        .await
        .map_err(|e| EncodingError::Task(e.to_string()))??;

        debug!(size = data.len(), "Encoding complete");

        Ok(Artifact {
            data,
            format,
            width,
            height,
        })
    }

    /// JPEG-encode an image into raw bytes (used for snapshots)
    pub async fn jpeg_bytes(&self, image: RgbaImage) -> Result<Vec<u8>, EncodingError> {
        let quality = self.quality;
        tokio::task::spawn_blocking(move || encode_jpeg(&image, quality.jpeg_quality()))
            .await
            .map_err(|e| EncodingError::Task(e.to_string()))?
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode image as JPEG, dropping the alpha channel
fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, EncodingError> {
    let (width, height) = image.dimensions();
    let rgb: Vec<u8> = image
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| EncodingError::Encode(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer)
}

/// Encode image as PNG
fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EncodingError> {
    let mut buffer = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| EncodingError::Encode(format!("PNG encoding failed: {}", e)))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_surface() -> RgbaImage {
        RgbaImage::from_fn(32, 24, |x, y| {
            image::Rgba([(x * 8) as u8, (y * 10) as u8, 50, 255])
        })
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(EncodingFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodingFormat::Png.extension(), "png");
        assert_eq!(EncodingFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("jpeg".parse::<EncodingFormat>().unwrap(), EncodingFormat::Jpeg);
        assert_eq!("PNG".parse::<EncodingFormat>().unwrap(), EncodingFormat::Png);
        assert!("webp".parse::<EncodingFormat>().is_err());
    }

    #[test]
    fn test_artifact_filename() {
        let artifact = Artifact {
            data: vec![1],
            format: EncodingFormat::Jpeg,
            width: 1,
            height: 1,
        };
        assert_eq!(artifact.filename(), "captured-photo-with-frame.jpg");
    }

    #[tokio::test]
    async fn test_encode_produces_nonempty_buffer() {
        let encoder = PhotoEncoder::new();
        let artifact = encoder
            .encode_as(test_surface(), EncodingFormat::Jpeg)
            .await
            .unwrap();
        assert!(!artifact.data.is_empty());
        assert_eq!(artifact.format, EncodingFormat::Jpeg);
        assert_eq!((artifact.width, artifact.height), (32, 24));
    }

    #[tokio::test]
    async fn test_encoding_is_deterministic() {
        let encoder = PhotoEncoder::new();
        let first = encoder
            .encode_as(test_surface(), EncodingFormat::Jpeg)
            .await
            .unwrap();
        let second = encoder
            .encode_as(test_surface(), EncodingFormat::Jpeg)
            .await
            .unwrap();
        assert_eq!(first.data, second.data);
    }

    #[tokio::test]
    async fn test_quality_affects_size() {
        let mut low = PhotoEncoder::new();
        low.set_quality(QualityPreset::Low);
        let mut max = PhotoEncoder::new();
        max.set_quality(QualityPreset::Maximum);

        let small = low
            .encode_as(test_surface(), EncodingFormat::Jpeg)
            .await
            .unwrap();
        let large = max
            .encode_as(test_surface(), EncodingFormat::Jpeg)
            .await
            .unwrap();
        assert!(small.data.len() <= large.data.len());
    }
}
