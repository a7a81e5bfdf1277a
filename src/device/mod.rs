//! Control-interface abstraction
//!
//! The motion and preset logic only ever talks to a [`Device`]. The real
//! backend lives in [`v4l2`] on Linux; tests use [`crate::testing::MockDevice`].

use crate::errors::DeviceError;
use serde::Serialize;
use std::path::Path;

#[cfg(target_os = "linux")]
pub mod v4l2;

#[cfg(target_os = "linux")]
pub use v4l2::V4l2Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlKind {
    Integer,
    Boolean,
    Menu,
    Button,
    Integer64,
    Other,
}

/// Capability descriptor returned by a control query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlDescriptor {
    pub id: u32,
    pub name: String,
    pub kind: ControlKind,
    pub minimum: i64,
    pub maximum: i64,
    pub step: u64,
    pub default: i64,
}

impl ControlDescriptor {
    pub fn integer(id: u32, name: impl Into<String>, minimum: i64, maximum: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ControlKind::Integer,
            minimum,
            maximum,
            step: 1,
            default: 0,
        }
    }
}

/// A handle to the numeric controls of a video device.
///
/// Every call except [`Device::open`] and [`Device::close`] fails with
/// [`DeviceError::NotOpen`] while the handle is closed.
pub trait Device: Send {
    fn open(&mut self, path: &Path) -> Result<(), DeviceError>;

    fn close(&mut self);

    fn is_open(&self) -> bool;

    fn set_control(&mut self, id: u32, value: i32) -> Result<(), DeviceError>;

    fn get_control(&self, id: u32) -> Result<i32, DeviceError>;

    fn query_control(&self, id: u32) -> Result<ControlDescriptor, DeviceError>;

    /// All controls the device exposes.
    fn list_controls(&self) -> Result<Vec<ControlDescriptor>, DeviceError>;
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn open(&mut self, path: &Path) -> Result<(), DeviceError> {
        (**self).open(path)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn set_control(&mut self, id: u32, value: i32) -> Result<(), DeviceError> {
        (**self).set_control(id, value)
    }

    fn get_control(&self, id: u32) -> Result<i32, DeviceError> {
        (**self).get_control(id)
    }

    fn query_control(&self, id: u32) -> Result<ControlDescriptor, DeviceError> {
        (**self).query_control(id)
    }

    fn list_controls(&self) -> Result<Vec<ControlDescriptor>, DeviceError> {
        (**self).list_controls()
    }
}
