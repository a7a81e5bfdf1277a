//! Estimated camera position
//!
//! The BCC950 has no absolute pan/tilt readback, only speed controls, so the
//! position is inferred from commanded speed multiplied by elapsed time and
//! clamped to a plausible range. It drifts whenever a physical move is
//! interrupted or the device is driven around the motion controller.

use crate::assert_invariant;
use crate::constants::{
    clamp_zoom, EST_PAN_MAX, EST_PAN_MIN, EST_TILT_MAX, EST_TILT_MIN, ZOOM_DEFAULT, ZOOM_MAX,
    ZOOM_MIN,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pan/tilt/zoom estimate plus the bounds it is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEstimator {
    pub pan: f64,
    pub tilt: f64,
    pub zoom: i32,
    pub pan_min: f64,
    pub pan_max: f64,
    pub tilt_min: f64,
    pub tilt_max: f64,
}

impl Default for PositionEstimator {
    fn default() -> Self {
        Self {
            pan: 0.0,
            tilt: 0.0,
            zoom: ZOOM_DEFAULT,
            pan_min: EST_PAN_MIN,
            pan_max: EST_PAN_MAX,
            tilt_min: EST_TILT_MIN,
            tilt_max: EST_TILT_MAX,
        }
    }
}

impl PositionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with custom pan/tilt bounds, starting at the origin.
    ///
    /// Each pair is put in order; a NaN bound falls back to the default one.
    pub fn with_bounds(pan_min: f64, pan_max: f64, tilt_min: f64, tilt_max: f64) -> Self {
        let (pan_min, pan_max) = ordered_bounds(pan_min, pan_max, EST_PAN_MIN, EST_PAN_MAX);
        let (tilt_min, tilt_max) = ordered_bounds(tilt_min, tilt_max, EST_TILT_MIN, EST_TILT_MAX);
        Self {
            pan_min,
            pan_max,
            tilt_min,
            tilt_max,
            ..Self::default()
        }
    }

    /// `pan += speed * duration`, clamped to the pan bounds.
    pub fn update_pan(&mut self, speed: i32, duration: f64) {
        self.pan = (self.pan + f64::from(speed) * duration).clamp(self.pan_min, self.pan_max);
        assert_invariant!(
            self.pan >= self.pan_min && self.pan <= self.pan_max,
            "pan within estimate bounds",
            "PositionEstimator::update_pan"
        );
    }

    /// `tilt += speed * duration`, clamped to the tilt bounds.
    pub fn update_tilt(&mut self, speed: i32, duration: f64) {
        self.tilt = (self.tilt + f64::from(speed) * duration).clamp(self.tilt_min, self.tilt_max);
        assert_invariant!(
            self.tilt >= self.tilt_min && self.tilt <= self.tilt_max,
            "tilt within estimate bounds",
            "PositionEstimator::update_tilt"
        );
    }

    /// Absolute zoom set, clamped to the hardware range.
    pub fn update_zoom(&mut self, value: i32) {
        self.zoom = clamp_zoom(value);
        assert_invariant!(
            (ZOOM_MIN..=ZOOM_MAX).contains(&self.zoom),
            "zoom within hardware range",
            "PositionEstimator::update_zoom"
        );
    }

    /// Euclidean distance over pan and tilt. Zoom is not part of the metric.
    pub fn distance_to(&self, other: &PositionEstimator) -> f64 {
        (self.pan - other.pan).hypot(self.tilt - other.tilt)
    }

    /// Back to the origin and default zoom, whatever the bounds are.
    pub fn reset(&mut self) {
        self.pan = 0.0;
        self.tilt = 0.0;
        self.zoom = ZOOM_DEFAULT;
    }

    /// The storable part of the estimate.
    pub fn snapshot(&self) -> Preset {
        Preset {
            pan: self.pan,
            tilt: self.tilt,
            zoom: self.zoom,
        }
    }
}

fn ordered_bounds(a: f64, b: f64, default_min: f64, default_max: f64) -> (f64, f64) {
    let a = if a.is_nan() { default_min } else { a };
    let b = if b.is_nan() { default_max } else { b };
    (a.min(b), a.max(b))
}

impl fmt::Display for PositionEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pan: {:.2}  Tilt: {:.2}  Zoom: {}",
            self.pan, self.tilt, self.zoom
        )
    }
}

/// A saved position: pan, tilt and zoom only, no bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    pub pan: f64,
    pub tilt: f64,
    pub zoom: i32,
}

impl Preset {
    pub fn new(pan: f64, tilt: f64, zoom: i32) -> Self {
        Self { pan, tilt, zoom }
    }

    /// Expand into an estimator with the default bounds.
    pub fn to_position(self) -> PositionEstimator {
        PositionEstimator {
            pan: self.pan,
            tilt: self.tilt,
            zoom: self.zoom,
            ..PositionEstimator::default()
        }
    }
}

impl From<PositionEstimator> for Preset {
    fn from(position: PositionEstimator) -> Self {
        position.snapshot()
    }
}
