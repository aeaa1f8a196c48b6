// SPDX-License-Identifier: GPL-3.0-only

//! Async booth photo pipeline
//!
//! ```text
//! Camera Backend → Capture → Composite (snapshot + overlay) → Encoding → Share / Disk
//! ```
//!
//! # Pipeline stages
//!
//! 1. **Capture**: grab one RGBA frame from the camera backend
//! 2. **Composite**: draw the snapshot as base layer, overlay stretched on top
//! 3. **Encoding**: flatten the surface to JPEG or PNG
//! 4. **Output**: hand the artifact to the share provider or save it to disk
//!
//! All CPU-bound stages run in blocking tasks so the stream and the caller
//! are never blocked. The stages are orchestrated by
//! [`crate::session::CaptureSession`].

pub mod capture;
pub mod compositor;
pub mod encoding;

pub use capture::PhotoCapture;
pub use compositor::Compositor;
pub use encoding::{Artifact, EncodingFormat, PhotoEncoder};
