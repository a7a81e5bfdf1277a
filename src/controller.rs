//! High-level controller for the BCC950
//!
//! Wires a [`Device`] to the config, the position estimator, the motion
//! controller and the preset store, and exposes the classic named moves
//! (`pan_left`, `zoom_in`, ...) using the speeds and step from the config.

use crate::config::Config;
use crate::constants::{CTRL_ZOOM_ABSOLUTE, ZOOM_MIN};
use crate::controls::ControlName;
use crate::device::{ControlDescriptor, Device};
use crate::discovery;
use crate::errors::{Bcc950Error, DeviceError, Result};
use crate::motion::MotionController;
use crate::position::{PositionEstimator, Preset};
use crate::presets::PresetStore;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

/// Nudge length used by [`Controller::reset_position`]
const RESET_NUDGE: Duration = Duration::from_millis(100);

/// Where the controller finds its device, config and presets.
///
/// `None` means: device from the config `DEVICE` key, config and presets at
/// their default locations in the home directory.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    pub device_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub presets_path: Option<PathBuf>,
}

impl ControllerOptions {
    pub fn with_device_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.device_path = Some(path.into());
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_presets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.presets_path = Some(path.into());
        self
    }
}

pub struct Controller<D: Device> {
    device: Arc<Mutex<D>>,
    device_path: PathBuf,
    config: Config,
    motion: MotionController<D>,
    presets: PresetStore,
}

impl<D: Device> Controller<D> {
    /// Controller with default config and preset locations.
    pub fn new(device: D) -> Result<Self> {
        Self::with_options(device, ControllerOptions::default())
    }

    /// Load config and presets, resolve the device path and open the device
    /// unless it is already open.
    pub fn with_options(mut device: D, options: ControllerOptions) -> Result<Self> {
        let config_path = options.config_path.unwrap_or_else(Config::default_path);
        let config = Config::load_from_file(config_path)?;

        let device_path = options
            .device_path
            .unwrap_or_else(|| PathBuf::from(config.device()));

        if !device.is_open() {
            device.open(&device_path)?;
        }

        let presets_path = options
            .presets_path
            .unwrap_or_else(PresetStore::default_path);
        let presets = PresetStore::open(presets_path)?;

        let device = Arc::new(Mutex::new(device));
        let position = Arc::new(RwLock::new(PositionEstimator::new()));
        let motion = MotionController::with_position(Arc::clone(&device), position);

        log::info!("Controller ready on {}", device_path.display());
        Ok(Self {
            device,
            device_path,
            config,
            motion,
            presets,
        })
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    /// Close the current handle and open `path` instead.
    pub fn set_device_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        {
            let mut device = self.lock_device()?;
            if device.is_open() {
                device.close();
            }
            device.open(&path)?;
        }
        self.device_path = path;
        Ok(())
    }

    /// Copy of the estimated position.
    pub fn position(&self) -> PositionEstimator {
        self.motion.position()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn motion(&self) -> &MotionController<D> {
        &self.motion
    }

    pub fn pan_left(&self, duration: Duration) -> Result<()> {
        Ok(self.motion.pan(self.config.pan_speed().saturating_neg(), duration)?)
    }

    pub fn pan_right(&self, duration: Duration) -> Result<()> {
        Ok(self.motion.pan(self.config.pan_speed(), duration)?)
    }

    pub fn tilt_up(&self, duration: Duration) -> Result<()> {
        Ok(self.motion.tilt(self.config.tilt_speed(), duration)?)
    }

    pub fn tilt_down(&self, duration: Duration) -> Result<()> {
        Ok(self.motion.tilt(self.config.tilt_speed().saturating_neg(), duration)?)
    }

    pub fn zoom_in(&self) -> Result<()> {
        Ok(self.motion.zoom_relative(self.config.zoom_step())?)
    }

    pub fn zoom_out(&self) -> Result<()> {
        Ok(self.motion.zoom_relative(self.config.zoom_step().saturating_neg())?)
    }

    /// Nudge each axis both ways, zoom fully out, then zero the estimate.
    ///
    /// The four nudges are separate moves; whatever they add to the estimate
    /// is discarded by the final reset to the origin.
    pub fn reset_position(&self) -> Result<()> {
        self.motion.pan(1, RESET_NUDGE)?;
        self.motion.pan(-1, RESET_NUDGE)?;
        self.motion.tilt(1, RESET_NUDGE)?;
        self.motion.tilt(-1, RESET_NUDGE)?;
        self.motion.zoom_absolute(ZOOM_MIN)?;
        self.motion.reset_estimate()?;
        Ok(())
    }

    /// Combined pan + tilt move.
    pub fn move_pan_tilt(&self, pan_dir: i32, tilt_dir: i32, duration: Duration) -> Result<()> {
        Ok(self.motion.combined_move(pan_dir, tilt_dir, duration)?)
    }

    pub fn zoom_to(&self, value: i32) -> Result<()> {
        Ok(self.motion.zoom_absolute(value)?)
    }

    /// Combined pan + tilt + absolute zoom.
    pub fn move_with_zoom(
        &self,
        pan_dir: i32,
        tilt_dir: i32,
        zoom_target: i32,
        duration: Duration,
    ) -> Result<()> {
        Ok(self
            .motion
            .combined_move_with_zoom(pan_dir, tilt_dir, zoom_target, duration)?)
    }

    /// Save the current estimate under `name`.
    pub fn save_preset(&mut self, name: &str) -> Result<()> {
        let position = self.position();
        Ok(self.presets.save_preset(name, &position)?)
    }

    /// Apply a saved preset. Returns `false` when `name` is unknown.
    ///
    /// Only zoom has an absolute control, so only zoom is restored.
    pub fn recall_preset(&self, name: &str) -> Result<bool> {
        let Some(preset) = self.presets.recall_preset(name) else {
            return Ok(false);
        };
        self.motion.zoom_absolute(preset.zoom)?;
        Ok(true)
    }

    /// Look up a preset without moving the camera.
    pub fn preset(&self, name: &str) -> Option<Preset> {
        self.presets.recall_preset(name)
    }

    pub fn delete_preset(&mut self, name: &str) -> Result<bool> {
        Ok(self.presets.delete_preset(name)?)
    }

    pub fn list_presets(&self) -> Vec<String> {
        self.presets.list_presets()
    }

    /// Zoom as reported by the hardware, bypassing the estimate.
    pub fn get_zoom(&self) -> Result<i32> {
        Ok(self.lock_device()?.get_control(CTRL_ZOOM_ABSOLUTE)?)
    }

    /// True only if pan speed, tilt speed and zoom can all be queried.
    pub fn has_ptz_support(&self) -> bool {
        match self.lock_device() {
            Ok(device) => discovery::has_ptz_controls(&*device),
            Err(_) => false,
        }
    }

    pub fn stop(&self) -> Result<()> {
        Ok(self.motion.stop()?)
    }

    /// Every control the device exposes.
    pub fn list_controls(&self) -> Result<Vec<ControlDescriptor>> {
        Ok(self.lock_device()?.list_controls()?)
    }

    /// Read a control by its `v4l2-ctl` name.
    pub fn get_named_control(&self, name: &str) -> Result<i32> {
        let control = parse_control(name)?;
        Ok(self.lock_device()?.get_control(control.id())?)
    }

    /// Write a control by its `v4l2-ctl` name.
    ///
    /// Zoom goes through the motion path so the estimate follows it. Pan and
    /// tilt speeds are written raw and leave the estimate stale.
    pub fn set_named_control(&self, name: &str, value: i32) -> Result<()> {
        let control = parse_control(name)?;
        match control {
            ControlName::ZoomAbsolute => self.motion.zoom_absolute(value)?,
            other => self.motion.set_control(other.id(), value)?,
        }
        Ok(())
    }

    /// Auto-detect a PTZ camera, switch to it and remember it in the config.
    #[cfg(target_os = "linux")]
    pub fn find_camera(&mut self) -> Result<Option<PathBuf>> {
        let Some(path) = discovery::find_ptz_device() else {
            return Ok(None);
        };
        self.use_camera(&path)?;
        Ok(Some(path))
    }

    /// Switch to `path` and store it as the config `DEVICE`.
    pub fn use_camera(&mut self, path: &Path) -> Result<()> {
        self.set_device_path(path)?;
        self.config.set_device(path.to_string_lossy());
        self.config.save()?;
        log::info!("Using camera {}", path.display());
        Ok(())
    }

    fn lock_device(&self) -> std::result::Result<MutexGuard<'_, D>, DeviceError> {
        self.device.lock().map_err(|_| DeviceError::PoisonedLock)
    }
}

fn parse_control(name: &str) -> Result<ControlName> {
    name.parse::<ControlName>()
        .map_err(|_| Bcc950Error::UnknownControl(name.to_string()))
}
