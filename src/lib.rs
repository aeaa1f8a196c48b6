// SPDX-License-Identifier: GPL-3.0-only

//! Framebooth
//!
//! A webcam photo booth: capture a still from the live camera feed,
//! composite it under a decorative frame overlay, and export the result
//! as a shareable image file.
//!
//! The crate is organized around a [`session::CaptureSession`] that owns
//! the camera stream and drives the capture, composite, and export flow:
//!
//! - [`backends`] - camera backend abstraction and GStreamer implementation
//! - [`pipelines`] - photo processing (capture, composite, encode)
//! - [`session`] - the Live/Captured booth state machine
//! - [`share`] - platform share capability
//! - [`storage`] - artifact saving
//! - [`config`] - persisted booth preferences

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod session;
pub mod share;
pub mod storage;

pub use backends::camera::{CameraBackendManager, CameraDevice, CameraFacing, CameraFormat};
pub use config::Config;
pub use constants::QualityPreset;
pub use errors::{BoothError, BoothResult};
pub use pipelines::photo::{Artifact, EncodingFormat};
pub use session::{CaptureSession, SessionMode, Snapshot};
