// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer capture pipeline
//!
//! Builds a source → videoconvert → RGBA appsink pipeline and keeps the
//! most recent frame available for single-shot capture. Frames are copied
//! out of the mapped buffer in the appsink callback, so capture never
//! blocks the stream.

use super::super::types::*;
use crate::constants::timing;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, error, info};

/// Camera capture pipeline
pub struct CameraPipeline {
    pipeline: gstreamer::Pipeline,
    latest_frame: Arc<Mutex<Option<CameraFrame>>>,
}

impl CameraPipeline {
    /// Create and start a pipeline for the given device and format
    pub fn new(device: &CameraDevice, format: &CameraFormat) -> BackendResult<Self> {
        gstreamer::init().map_err(|e| BackendError::InitializationFailed(e.to_string()))?;

        let launch = build_launch_string(device, format)?;
        info!(device = %device.name, format = %format, launch = %launch, "Creating capture pipeline");

        let pipeline = gstreamer::parse::launch(&launch)
            .map_err(|e| BackendError::InitializationFailed(e.to_string()))?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| {
                BackendError::InitializationFailed("Launch string did not yield a pipeline".into())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| BackendError::InitializationFailed("Failed to get appsink".into()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| BackendError::InitializationFailed("Failed to cast appsink".into()))?;

        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", 2u32);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        let latest_frame: Arc<Mutex<Option<CameraFrame>>> = Arc::new(Mutex::new(None));
        let frame_slot = Arc::clone(&latest_frame);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let sample = appsink.pull_sample().map_err(|e| {
                        error!(error = ?e, "Failed to pull sample");
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info =
                        VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
                    let map = buffer
                        .map_readable()
                        .map_err(|_| gstreamer::FlowError::Error)?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        data: Arc::from(map.as_slice()),
                        format: PixelFormat::RGBA,
                        stride: video_info.stride()[0] as u32,
                        captured_at: Instant::now(),
                    };

                    if let Ok(mut slot) = frame_slot.lock() {
                        *slot = Some(frame);
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| BackendError::InitializationFailed(format!("{:?}", e)))?;

        wait_for_pipeline_ready(&pipeline)?;
        debug!("Capture pipeline running");

        Ok(Self {
            pipeline,
            latest_frame,
        })
    }

    /// Get a copy of the most recent frame, if any has been delivered
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.latest_frame.lock().ok()?.clone()
    }

    /// Stop the pipeline and release the device
    pub fn stop(&self) {
        let _ = self.pipeline.set_state(gstreamer::State::Null);
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Build the gst-launch style pipeline description for a device
fn build_launch_string(device: &CameraDevice, format: &CameraFormat) -> BackendResult<String> {
    let source = source_fragment(&device.path)?;
    Ok(format!(
        "{} ! queue max-size-buffers=2 leaky=downstream ! \
         videoconvert ! videoscale ! \
         video/x-raw,format=RGBA,width={},height={} ! \
         appsink name=sink sync=false",
        source, format.width, format.height
    ))
}

/// Determine the source element and its device property.
///
/// PipeWire is preferred; raw V4L2 paths fall back to v4l2src when the
/// PipeWire plugin is missing.
fn source_fragment(device_path: &str) -> BackendResult<String> {
    let have_pipewire = gstreamer::ElementFactory::find("pipewiresrc").is_some();
    let have_v4l2 = gstreamer::ElementFactory::find("v4l2src").is_some();

    if have_pipewire {
        let target = if device_path.is_empty() {
            // PipeWire auto-selects the default camera
            String::new()
        } else if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
            format!("target-object={} ", serial)
        } else if device_path.starts_with("/dev/video") {
            format!("path=v4l2:{} ", device_path)
        } else {
            format!("path={} ", device_path)
        };
        return Ok(format!("pipewiresrc {}do-timestamp=true", target));
    }

    if have_v4l2 && device_path.starts_with("/dev/video") {
        return Ok(format!("v4l2src device={}", device_path));
    }

    Err(BackendError::NotAvailable(
        "Neither pipewiresrc nor v4l2src is available".into(),
    ))
}

/// Wait for the pipeline to reach its ready state or report an error
fn wait_for_pipeline_ready(pipeline: &gstreamer::Pipeline) -> BackendResult<()> {
    let bus = pipeline
        .bus()
        .ok_or_else(|| BackendError::InitializationFailed("No bus on pipeline".into()))?;
    let deadline = Instant::now() + timing::PIPELINE_READY_TIMEOUT;

    while Instant::now() < deadline {
        if let Some(msg) = bus.timed_pop(gstreamer::ClockTime::from_mseconds(100)) {
            use gstreamer::MessageView;
            match msg.view() {
                MessageView::Error(err) => {
                    return Err(BackendError::InitializationFailed(format!(
                        "Pipeline error: {}",
                        err.error()
                    )));
                }
                MessageView::AsyncDone(_) => return Ok(()),
                _ => {}
            }
        }
    }
    // Timeout is not necessarily an error; some sources never post AsyncDone
    Ok(())
}
