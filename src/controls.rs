//! Named V4L2 controls
//!
//! Pass-through table for the controls a UVC webcam commonly exposes, keyed
//! by the `v4l2-ctl` style name. Only the three PTZ controls take part in
//! motion; the rest are set and read verbatim.

use crate::constants::{CTRL_PAN_SPEED, CTRL_TILT_SPEED, CTRL_ZOOM_ABSOLUTE};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

lazy_static::lazy_static! {
    /// Canonical names plus the short aliases accepted by the CLI
    static ref BY_NAME: HashMap<&'static str, ControlName> = {
        let mut map: HashMap<&'static str, ControlName> =
            ControlName::ALL.iter().map(|c| (c.as_str(), *c)).collect();
        map.insert("zoom", ControlName::ZoomAbsolute);
        map.insert("focus", ControlName::FocusAbsolute);
        map.insert("exposure", ControlName::ExposureAbsolute);
        map.insert("white_balance", ControlName::WhiteBalanceTemperature);
        map
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlName {
    Brightness,
    Contrast,
    Saturation,
    Hue,
    WhiteBalanceTemperatureAuto,
    Gain,
    PowerLineFrequency,
    WhiteBalanceTemperature,
    Sharpness,
    BacklightCompensation,
    ExposureAuto,
    ExposureAbsolute,
    ExposureAutoPriority,
    PanAbsolute,
    TiltAbsolute,
    FocusAbsolute,
    FocusAuto,
    ZoomAbsolute,
    PanSpeed,
    TiltSpeed,
}

impl ControlName {
    pub const ALL: [ControlName; 20] = [
        Self::Brightness,
        Self::Contrast,
        Self::Saturation,
        Self::Hue,
        Self::WhiteBalanceTemperatureAuto,
        Self::Gain,
        Self::PowerLineFrequency,
        Self::WhiteBalanceTemperature,
        Self::Sharpness,
        Self::BacklightCompensation,
        Self::ExposureAuto,
        Self::ExposureAbsolute,
        Self::ExposureAutoPriority,
        Self::PanAbsolute,
        Self::TiltAbsolute,
        Self::FocusAbsolute,
        Self::FocusAuto,
        Self::ZoomAbsolute,
        Self::PanSpeed,
        Self::TiltSpeed,
    ];

    /// The V4L2 control id.
    pub fn id(self) -> u32 {
        match self {
            Self::Brightness => 0x0098_0900,
            Self::Contrast => 0x0098_0901,
            Self::Saturation => 0x0098_0902,
            Self::Hue => 0x0098_0903,
            Self::WhiteBalanceTemperatureAuto => 0x0098_090c,
            Self::Gain => 0x0098_0913,
            Self::PowerLineFrequency => 0x0098_0918,
            Self::WhiteBalanceTemperature => 0x0098_091a,
            Self::Sharpness => 0x0098_091b,
            Self::BacklightCompensation => 0x0098_091c,
            Self::ExposureAuto => 0x009a_0901,
            Self::ExposureAbsolute => 0x009a_0902,
            Self::ExposureAutoPriority => 0x009a_0903,
            Self::PanAbsolute => 0x009a_0908,
            Self::TiltAbsolute => 0x009a_0909,
            Self::FocusAbsolute => 0x009a_090a,
            Self::FocusAuto => 0x009a_090c,
            Self::ZoomAbsolute => CTRL_ZOOM_ABSOLUTE,
            Self::PanSpeed => CTRL_PAN_SPEED,
            Self::TiltSpeed => CTRL_TILT_SPEED,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Hue => "hue",
            Self::WhiteBalanceTemperatureAuto => "white_balance_temperature_auto",
            Self::Gain => "gain",
            Self::PowerLineFrequency => "power_line_frequency",
            Self::WhiteBalanceTemperature => "white_balance_temperature",
            Self::Sharpness => "sharpness",
            Self::BacklightCompensation => "backlight_compensation",
            Self::ExposureAuto => "exposure_auto",
            Self::ExposureAbsolute => "exposure_absolute",
            Self::ExposureAutoPriority => "exposure_auto_priority",
            Self::PanAbsolute => "pan_absolute",
            Self::TiltAbsolute => "tilt_absolute",
            Self::FocusAbsolute => "focus_absolute",
            Self::FocusAuto => "focus_auto",
            Self::ZoomAbsolute => "zoom_absolute",
            Self::PanSpeed => "pan_speed",
            Self::TiltSpeed => "tilt_speed",
        }
    }

    /// Reverse lookup from a control id.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Whether setting this control moves the camera head.
    pub fn is_motion(self) -> bool {
        matches!(self, Self::PanSpeed | Self::TiltSpeed | Self::ZoomAbsolute)
    }
}

impl fmt::Display for ControlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        BY_NAME.get(normalized.as_str()).copied().ok_or(())
    }
}
