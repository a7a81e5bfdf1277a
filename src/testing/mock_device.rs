use crate::controls::ControlName;
use crate::device::{ControlDescriptor, Device};
use crate::errors::DeviceError;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A recorded `set_control(id, value)` call.
pub type DeviceCall = (u32, i32);

/// In-memory device that records every `set_control` call.
///
/// Starts open, reports every control in [`ControlName::ALL`] as supported,
/// and returns the last value set (or a seeded value, or 0) from `get_control`.
#[derive(Debug, Clone)]
pub struct MockDevice {
    open: bool,
    calls: Vec<DeviceCall>,
    values: HashMap<u32, i32>,
    opened: Vec<PathBuf>,
    failing: HashSet<u32>,
    unsupported: HashSet<u32>,
    fail_open: bool,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self {
            open: true,
            calls: Vec::new(),
            values: HashMap::new(),
            opened: Vec::new(),
            failing: HashSet::new(),
            unsupported: HashSet::new(),
            fail_open: false,
        }
    }
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that has to be opened before use.
    pub fn closed() -> Self {
        Self {
            open: false,
            ..Self::default()
        }
    }

    /// Make every `set_control` on `id` fail.
    pub fn fail_control(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    /// Make `query_control` report `id` as missing.
    pub fn without_control(mut self, id: u32) -> Self {
        self.unsupported.insert(id);
        self
    }

    /// Make `open` fail.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Last value stored for `id`, 0 if never set.
    pub fn stored_value(&self, id: u32) -> i32 {
        self.values.get(&id).copied().unwrap_or(0)
    }

    /// Seed a control value without recording a call.
    pub fn set_stored_value(&mut self, id: u32, value: i32) {
        self.values.insert(id, value);
    }

    /// Every path passed to `open`, in order.
    pub fn opened_paths(&self) -> &[PathBuf] {
        &self.opened
    }

    fn ensure_open(&self) -> Result<(), DeviceError> {
        if self.open {
            Ok(())
        } else {
            Err(DeviceError::NotOpen)
        }
    }

    fn descriptor(&self, id: u32) -> ControlDescriptor {
        let name = ControlName::from_id(id)
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| format!("control_{:#x}", id));
        ControlDescriptor::integer(id, name, 0, 100)
    }
}

impl Device for MockDevice {
    fn open(&mut self, path: &Path) -> Result<(), DeviceError> {
        if self.fail_open {
            return Err(DeviceError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock open failure"),
            });
        }
        self.opened.push(path.to_path_buf());
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_control(&mut self, id: u32, value: i32) -> Result<(), DeviceError> {
        self.ensure_open()?;
        if self.failing.contains(&id) {
            return Err(DeviceError::Backend(format!(
                "injected failure on control {:#x}",
                id
            )));
        }
        self.calls.push((id, value));
        self.values.insert(id, value);
        Ok(())
    }

    fn get_control(&self, id: u32) -> Result<i32, DeviceError> {
        self.ensure_open()?;
        Ok(self.stored_value(id))
    }

    fn query_control(&self, id: u32) -> Result<ControlDescriptor, DeviceError> {
        self.ensure_open()?;
        if self.unsupported.contains(&id) {
            return Err(DeviceError::UnsupportedControl { id });
        }
        Ok(self.descriptor(id))
    }

    fn list_controls(&self) -> Result<Vec<ControlDescriptor>, DeviceError> {
        self.ensure_open()?;
        Ok(ControlName::ALL
            .iter()
            .map(|c| c.id())
            .filter(|id| !self.unsupported.contains(id))
            .map(|id| self.descriptor(id))
            .collect())
    }
}
