//! Hardware constants and limits for the BCC950
//!
//! Control ids match `linux/v4l2-controls.h` (camera class base `0x009a0900`).

use std::path::PathBuf;
use std::time::Duration;

/// `V4L2_CID_ZOOM_ABSOLUTE`
pub const CTRL_ZOOM_ABSOLUTE: u32 = 0x009a_090d;
/// `V4L2_CID_PAN_SPEED`
pub const CTRL_PAN_SPEED: u32 = 0x009a_0920;
/// `V4L2_CID_TILT_SPEED`
pub const CTRL_TILT_SPEED: u32 = 0x009a_0921;

pub const ZOOM_MIN: i32 = 100;
pub const ZOOM_MAX: i32 = 500;
pub const ZOOM_DEFAULT: i32 = ZOOM_MIN;

pub const PAN_SPEED_MIN: i32 = -1;
pub const PAN_SPEED_MAX: i32 = 1;
pub const TILT_SPEED_MIN: i32 = -1;
pub const TILT_SPEED_MAX: i32 = 1;

pub const DEFAULT_PAN_SPEED: i32 = 1;
pub const DEFAULT_TILT_SPEED: i32 = 1;
pub const DEFAULT_ZOOM_STEP: i32 = 10;

/// Default duration of a single timed move
pub const DEFAULT_MOVE_DURATION: Duration = Duration::from_millis(100);

/// Estimated position range, in movement-seconds
pub const EST_PAN_MIN: f64 = -5.0;
pub const EST_PAN_MAX: f64 = 5.0;
pub const EST_TILT_MIN: f64 = -3.0;
pub const EST_TILT_MAX: f64 = 3.0;

pub const DEFAULT_CONFIG_FILENAME: &str = ".bcc950_config";
pub const DEFAULT_PRESETS_FILENAME: &str = ".bcc950_presets.json";
pub const DEFAULT_DEVICE: &str = "/dev/video0";

/// Clamp a direction/speed request to the range the motors accept.
///
/// Pan and tilt share the same [-1, 1] range on this camera.
pub fn clamp_speed(value: i32) -> i32 {
    value.clamp(PAN_SPEED_MIN, PAN_SPEED_MAX)
}

/// Clamp a zoom request to [`ZOOM_MIN`, `ZOOM_MAX`].
///
/// Every zoom path (absolute, relative, combined move, estimator) goes through here.
pub fn clamp_zoom(value: i32) -> i32 {
    value.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// The user's home directory, or the current directory when `$HOME` is unset.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
