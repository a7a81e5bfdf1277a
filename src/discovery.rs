//! PTZ capability probing and camera auto-detection

use crate::constants::{CTRL_PAN_SPEED, CTRL_TILT_SPEED, CTRL_ZOOM_ABSOLUTE};
use crate::device::Device;
use std::path::PathBuf;

/// Controls a device must expose to be driven by this crate
pub const PTZ_CONTROLS: [u32; 3] = [CTRL_PAN_SPEED, CTRL_TILT_SPEED, CTRL_ZOOM_ABSOLUTE];

/// Whether `device` answers a query for pan speed, tilt speed and zoom.
///
/// Any query failure counts as "not supported" and is logged, never returned.
pub fn has_ptz_controls<D: Device + ?Sized>(device: &D) -> bool {
    for id in PTZ_CONTROLS {
        if let Err(e) = device.query_control(id) {
            log::warn!("PTZ control {:#010x} unavailable: {}", id, e);
            return false;
        }
    }
    true
}

/// Pick a PTZ camera out of `(path, card name)` candidates.
///
/// A card name containing "BCC950" wins outright; otherwise the first
/// candidate `probe` reports as PTZ-capable is returned.
pub fn select_ptz_device<F>(candidates: &[(PathBuf, String)], mut probe: F) -> Option<PathBuf>
where
    F: FnMut(&PathBuf) -> bool,
{
    if let Some((path, _)) = candidates.iter().find(|(_, name)| name.contains("BCC950")) {
        return Some(path.clone());
    }

    let mut paths: Vec<&PathBuf> = candidates.iter().map(|(path, _)| path).collect();
    paths.sort();
    paths.into_iter().find(|path| probe(path)).cloned()
}

/// Find an attached PTZ camera by scanning the V4L2 nodes.
#[cfg(target_os = "linux")]
pub fn find_ptz_device() -> Option<PathBuf> {
    use crate::device::v4l2::{utils, V4l2Device};

    let mut candidates = utils::list_named_devices();
    if candidates.is_empty() {
        candidates = utils::list_video_devices()
            .into_iter()
            .map(|path| (path, String::new()))
            .collect();
    }

    let found = select_ptz_device(&candidates, |path| match V4l2Device::with_path(path) {
        Ok(device) => has_ptz_controls(&device),
        Err(e) => {
            log::debug!("Skipping {}: {}", path.display(), e);
            false
        }
    });

    match &found {
        Some(path) => log::info!("Found PTZ camera at {}", path.display()),
        None => log::info!("No PTZ camera found"),
    }
    found
}
