use crate::device::{ControlDescriptor, ControlKind, Device};
use crate::errors::DeviceError;
use std::path::{Path, PathBuf};
use v4l::control::{Control, Description, Type, Value};

/// V4L2-backed control handle built on the `v4l` crate.
#[derive(Default)]
pub struct V4l2Device {
    handle: Option<v4l::Device>,
    path: Option<PathBuf>,
}

impl V4l2Device {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a handle on `path` right away.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let mut device = Self::new();
        device.open(path.as_ref())?;
        Ok(device)
    }

    /// Path of the currently open node, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn handle(&self) -> Result<&v4l::Device, DeviceError> {
        self.handle.as_ref().ok_or(DeviceError::NotOpen)
    }
}

impl Device for V4l2Device {
    fn open(&mut self, path: &Path) -> Result<(), DeviceError> {
        if self.handle.is_some() {
            self.close();
        }

        let handle = v4l::Device::with_path(path).map_err(|source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Opened V4L2 device {}", path.display());
        self.handle = Some(handle);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn close(&mut self) {
        if self.handle.take().is_some() {
            if let Some(path) = self.path.take() {
                log::info!("Closed V4L2 device {}", path.display());
            }
        }
    }

    fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn set_control(&mut self, id: u32, value: i32) -> Result<(), DeviceError> {
        let handle = self.handle()?;
        handle
            .set_control(Control {
                id,
                value: Value::Integer(i64::from(value)),
            })
            .map_err(|source| DeviceError::Ioctl {
                op: "VIDIOC_S_CTRL",
                id,
                source,
            })
    }

    fn get_control(&self, id: u32) -> Result<i32, DeviceError> {
        let handle = self.handle()?;
        let control = handle.control(id).map_err(|source| DeviceError::Ioctl {
            op: "VIDIOC_G_CTRL",
            id,
            source,
        })?;

        match control.value {
            Value::Integer(v) => i32::try_from(v).map_err(|_| DeviceError::UnexpectedValue { id }),
            Value::Boolean(b) => Ok(i32::from(b)),
            _ => Err(DeviceError::UnexpectedValue { id }),
        }
    }

    fn query_control(&self, id: u32) -> Result<ControlDescriptor, DeviceError> {
        self.list_controls()?
            .into_iter()
            .find(|desc| desc.id == id)
            .ok_or(DeviceError::UnsupportedControl { id })
    }

    fn list_controls(&self) -> Result<Vec<ControlDescriptor>, DeviceError> {
        let handle = self.handle()?;
        let descriptions = handle
            .query_controls()
            .map_err(|source| DeviceError::Ioctl {
                op: "VIDIOC_QUERYCTRL",
                id: 0,
                source,
            })?;

        Ok(descriptions.into_iter().map(descriptor_from).collect())
    }
}

impl Drop for V4l2Device {
    fn drop(&mut self) {
        self.close();
    }
}

fn descriptor_from(desc: Description) -> ControlDescriptor {
    let kind = match desc.typ {
        Type::Integer => ControlKind::Integer,
        Type::Boolean => ControlKind::Boolean,
        Type::Menu => ControlKind::Menu,
        Type::Button => ControlKind::Button,
        Type::Integer64 => ControlKind::Integer64,
        _ => ControlKind::Other,
    };

    ControlDescriptor {
        id: desc.id,
        name: desc.name,
        kind,
        minimum: desc.minimum,
        maximum: desc.maximum,
        step: desc.step,
        default: desc.default,
    }
}

/// Linux-specific device helpers
pub mod utils {
    use std::path::{Path, PathBuf};

    /// Check if any V4L2 node is present
    pub fn is_v4l2_available() -> bool {
        Path::new("/dev/video0").exists()
    }

    /// List V4L2 nodes `/dev/video0` through `/dev/video9`
    pub fn list_video_devices() -> Vec<PathBuf> {
        (0..10)
            .map(|i| PathBuf::from(format!("/dev/video{}", i)))
            .filter(|path| path.exists())
            .collect()
    }

    /// Enumerate capture nodes together with the card name the driver reports.
    pub fn list_named_devices() -> Vec<(PathBuf, String)> {
        v4l::context::enum_devices()
            .into_iter()
            .map(|node| {
                let name = node.name().unwrap_or_else(|| "unknown".to_string());
                (node.path().to_path_buf(), name)
            })
            .collect()
    }
}
