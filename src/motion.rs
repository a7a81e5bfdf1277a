//! Serialized timed motion
//!
//! Every public operation holds the motion lock for its whole duration,
//! including the sleep between the start and stop commands. A second caller
//! blocks until the first one has issued its stop, so the device never sees
//! interleaved speed commands from two logical moves. The lock is per
//! controller; two controllers on two devices run independently.
//!
//! Moves cannot be cancelled once started. Keep durations short when calling
//! from latency-sensitive code.
//!
//! On a device error the operation returns immediately and the estimator is
//! left untouched. No cleanup is attempted: a failed `combined_move` may leave
//! one axis running, so callers should follow any motion error with
//! [`MotionController::stop`].

use crate::constants::{
    clamp_speed, clamp_zoom, CTRL_PAN_SPEED, CTRL_TILT_SPEED, CTRL_ZOOM_ABSOLUTE,
};
use crate::device::Device;
use crate::errors::DeviceError;
use crate::position::PositionEstimator;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread;
use std::time::Duration;

pub struct MotionController<D: Device> {
    device: Arc<Mutex<D>>,
    position: Arc<RwLock<PositionEstimator>>,
    motion_lock: Mutex<()>,
}

impl<D: Device> MotionController<D> {
    /// Controller with its own estimator.
    pub fn new(device: Arc<Mutex<D>>) -> Self {
        Self::with_position(device, Arc::new(RwLock::new(PositionEstimator::new())))
    }

    /// Controller updating an estimator shared with the caller.
    pub fn with_position(device: Arc<Mutex<D>>, position: Arc<RwLock<PositionEstimator>>) -> Self {
        Self {
            device,
            position,
            motion_lock: Mutex::new(()),
        }
    }

    /// Pan at `direction` (clamped to -1..=1) for `duration`.
    ///
    /// Negative is left, positive is right.
    pub fn pan(&self, direction: i32, duration: Duration) -> Result<(), DeviceError> {
        let speed = clamp_speed(direction);
        let _guard = self.lock_motion()?;

        self.send(CTRL_PAN_SPEED, speed)?;
        thread::sleep(duration);
        self.send(CTRL_PAN_SPEED, 0)?;

        self.update_position(|p| p.update_pan(speed, duration.as_secs_f64()));
        Ok(())
    }

    /// Tilt at `direction` (clamped to -1..=1) for `duration`.
    ///
    /// Positive is up, negative is down.
    pub fn tilt(&self, direction: i32, duration: Duration) -> Result<(), DeviceError> {
        let speed = clamp_speed(direction);
        let _guard = self.lock_motion()?;

        self.send(CTRL_TILT_SPEED, speed)?;
        thread::sleep(duration);
        self.send(CTRL_TILT_SPEED, 0)?;

        self.update_position(|p| p.update_tilt(speed, duration.as_secs_f64()));
        Ok(())
    }

    /// Pan and tilt together with a single wait.
    pub fn combined_move(
        &self,
        pan_dir: i32,
        tilt_dir: i32,
        duration: Duration,
    ) -> Result<(), DeviceError> {
        let pan_speed = clamp_speed(pan_dir);
        let tilt_speed = clamp_speed(tilt_dir);
        let _guard = self.lock_motion()?;

        self.send(CTRL_PAN_SPEED, pan_speed)?;
        self.send(CTRL_TILT_SPEED, tilt_speed)?;
        thread::sleep(duration);
        self.send(CTRL_PAN_SPEED, 0)?;
        self.send(CTRL_TILT_SPEED, 0)?;

        let secs = duration.as_secs_f64();
        self.update_position(|p| {
            p.update_pan(pan_speed, secs);
            p.update_tilt(tilt_speed, secs);
        });
        Ok(())
    }

    /// Pan, tilt and an absolute zoom in the same burst.
    pub fn combined_move_with_zoom(
        &self,
        pan_dir: i32,
        tilt_dir: i32,
        zoom_target: i32,
        duration: Duration,
    ) -> Result<(), DeviceError> {
        let pan_speed = clamp_speed(pan_dir);
        let tilt_speed = clamp_speed(tilt_dir);
        let zoom = clamp_zoom(zoom_target);
        let _guard = self.lock_motion()?;

        self.send(CTRL_PAN_SPEED, pan_speed)?;
        self.send(CTRL_TILT_SPEED, tilt_speed)?;
        self.send(CTRL_ZOOM_ABSOLUTE, zoom)?;
        thread::sleep(duration);
        self.send(CTRL_PAN_SPEED, 0)?;
        self.send(CTRL_TILT_SPEED, 0)?;

        let secs = duration.as_secs_f64();
        self.update_position(|p| {
            p.update_pan(pan_speed, secs);
            p.update_tilt(tilt_speed, secs);
            p.update_zoom(zoom);
        });
        Ok(())
    }

    /// Set zoom directly. No wait: zoom is an absolute control.
    pub fn zoom_absolute(&self, value: i32) -> Result<(), DeviceError> {
        let zoom = clamp_zoom(value);
        let _guard = self.lock_motion()?;

        self.send(CTRL_ZOOM_ABSOLUTE, zoom)?;
        self.update_position(|p| p.update_zoom(zoom));
        Ok(())
    }

    /// Zoom by `delta` from the estimated zoom.
    pub fn zoom_relative(&self, delta: i32) -> Result<(), DeviceError> {
        let _guard = self.lock_motion()?;

        let zoom = clamp_zoom(self.position().zoom.saturating_add(delta));
        self.send(CTRL_ZOOM_ABSOLUTE, zoom)?;
        self.update_position(|p| p.update_zoom(zoom));
        Ok(())
    }

    /// Emergency halt: zero both speed controls.
    ///
    /// Leaves zoom alone and does not touch the estimator, which is stale
    /// afterwards if a move was cut short by other means.
    pub fn stop(&self) -> Result<(), DeviceError> {
        let _guard = self.lock_motion()?;

        self.send(CTRL_PAN_SPEED, 0)?;
        self.send(CTRL_TILT_SPEED, 0)?;
        Ok(())
    }

    /// Issue one raw control write under the motion lock.
    ///
    /// Used for pass-through controls; the estimator is not updated.
    pub fn set_control(&self, id: u32, value: i32) -> Result<(), DeviceError> {
        let _guard = self.lock_motion()?;
        self.send(id, value)
    }

    /// Zero the estimate under the motion lock. No device command is sent.
    pub fn reset_estimate(&self) -> Result<(), DeviceError> {
        let _guard = self.lock_motion()?;
        self.update_position(PositionEstimator::reset);
        Ok(())
    }

    /// Copy of the current estimate.
    pub fn position(&self) -> PositionEstimator {
        match self.position.read() {
            Ok(p) => *p,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// The estimator this controller updates.
    pub fn position_handle(&self) -> Arc<RwLock<PositionEstimator>> {
        Arc::clone(&self.position)
    }

    /// The device this controller drives.
    pub fn device_handle(&self) -> Arc<Mutex<D>> {
        Arc::clone(&self.device)
    }

    fn lock_motion(&self) -> Result<MutexGuard<'_, ()>, DeviceError> {
        self.motion_lock
            .lock()
            .map_err(|_| DeviceError::PoisonedLock)
    }

    fn send(&self, id: u32, value: i32) -> Result<(), DeviceError> {
        let mut device = self.device.lock().map_err(|_| DeviceError::PoisonedLock)?;
        log::debug!("set control {:#010x} = {}", id, value);
        device.set_control(id, value)
    }

    fn update_position(&self, f: impl FnOnce(&mut PositionEstimator)) {
        let mut guard = match self.position.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut *guard);
    }
}
