// SPDX-License-Identifier: GPL-3.0-only

//! Camera device enumeration via the GStreamer device monitor

use super::super::types::*;
use gstreamer::prelude::*;
use tracing::{debug, warn};

/// Property keys that may carry the physical camera location
const LOCATION_KEYS: [&str; 3] = ["api.libcamera.location", "device.location", "camera.location"];

/// Enumerate video sources, returning each device with its supported formats
pub fn enumerate_devices() -> BackendResult<Vec<(CameraDevice, Vec<CameraFormat>)>> {
    gstreamer::init().map_err(|e| BackendError::NotAvailable(e.to_string()))?;

    let monitor = gstreamer::DeviceMonitor::new();
    let _filter_id = monitor.add_filter(Some("Video/Source"), None);
    monitor
        .start()
        .map_err(|e| BackendError::NotAvailable(format!("Device monitor failed: {}", e)))?;

    let mut cameras = Vec::new();
    for device in monitor.devices() {
        let name = device.display_name().to_string();
        let properties = device.properties();

        let path = device_path(properties.as_ref()).unwrap_or_else(|| {
            warn!(device = %name, "No device path property, using name");
            name.clone()
        });
        let location = properties.as_ref().and_then(device_location);

        let formats = device.caps().map(formats_from_caps).unwrap_or_default();

        debug!(
            device = %name,
            path = %path,
            location = ?location,
            format_count = formats.len(),
            "Found camera device"
        );

        cameras.push((
            CameraDevice {
                name,
                path,
                location,
            },
            formats,
        ));
    }
    monitor.stop();

    Ok(cameras)
}

/// Resolve a stable device path from monitor properties.
///
/// PipeWire serials are preferred because node IDs change across
/// reconnects; V4L2 paths are kept as-is so the fallback source can
/// open them directly.
fn device_path(properties: Option<&gstreamer::Structure>) -> Option<String> {
    let properties = properties?;

    if let Ok(serial) = properties.get::<u64>("object.serial") {
        return Some(format!("pipewire-serial-{}", serial));
    }
    for key in ["object.path", "device.path", "api.v4l2.path"] {
        if let Ok(path) = properties.get::<String>(key) {
            return Some(path);
        }
    }
    None
}

/// Extract the reported camera location ("front", "back", "external")
fn device_location(properties: &gstreamer::Structure) -> Option<String> {
    LOCATION_KEYS
        .iter()
        .find_map(|key| properties.get::<String>(*key).ok())
}

/// Read resolution/framerate combinations out of a device's caps
fn formats_from_caps(caps: gstreamer::Caps) -> Vec<CameraFormat> {
    let mut formats = Vec::new();

    for structure in caps.iter() {
        let (Ok(width), Ok(height)) = (
            structure.get::<i32>("width"),
            structure.get::<i32>("height"),
        ) else {
            continue;
        };
        if width <= 0 || height <= 0 {
            continue;
        }

        let pixel_format = if structure.name().as_str() == "image/jpeg" {
            "MJPG".to_string()
        } else {
            structure
                .get::<String>("format")
                .unwrap_or_else(|_| "RAW".to_string())
        };

        let framerate = structure
            .get::<gstreamer::Fraction>("framerate")
            .ok()
            .filter(|f| f.numer() > 0)
            .map(|f| Framerate::new(f.numer() as u32, f.denom() as u32));

        let format = CameraFormat {
            width: width as u32,
            height: height as u32,
            framerate,
            pixel_format,
        };
        if !formats.contains(&format) {
            formats.push(format);
        }
    }

    formats
}
