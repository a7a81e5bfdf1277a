//! bcc950: pan/tilt/zoom control for the Logitech BCC950 ConferenceCam
//!
//! The camera has no absolute pan or tilt. Motion is driven through the V4L2
//! `pan_speed`/`tilt_speed` controls for a timed burst, and the head position
//! is dead-reckoned from speed and duration. Zoom is absolute.
//!
//! # Layers
//! - [`device`]: the [`Device`] trait and its V4L2 implementation
//! - [`motion`]: serialized start/wait/stop sequences over a device
//! - [`position`]: the dead-reckoning estimator
//! - [`presets`]: named positions persisted as JSON
//! - [`controller`]: the façade tying it together with [`config`]
//!
//! # Usage
//! ```rust,ignore
//! use bcc950::{Controller, V4l2Device};
//! use std::time::Duration;
//!
//! let mut camera = Controller::new(V4l2Device::new())?;
//! camera.pan_left(Duration::from_millis(300))?;
//! camera.zoom_to(250)?;
//! camera.save_preset("desk")?;
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod controls;
pub mod device;
pub mod discovery;
pub mod errors;
pub mod invariants;
pub mod motion;
pub mod position;
pub mod presets;

// Mock device for tests and downstream simulations
pub mod testing;

pub use config::Config;
pub use controller::{Controller, ControllerOptions};
pub use controls::ControlName;
pub use device::{ControlDescriptor, ControlKind, Device};
pub use errors::{Bcc950Error, ConfigError, DeviceError, PresetError, Result};
pub use motion::MotionController;
pub use position::{PositionEstimator, Preset};
pub use presets::PresetStore;

#[cfg(target_os = "linux")]
pub use device::V4l2Device;

/// Initialize the crate with logging
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "bcc950=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
        v4l2_available: v4l2_available(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub v4l2_available: bool,
}

#[cfg(target_os = "linux")]
fn v4l2_available() -> bool {
    device::v4l2::utils::is_v4l2_available()
}

#[cfg(not(target_os = "linux"))]
fn v4l2_available() -> bool {
    false
}
