//! Configuration management for the BCC950 controller
//!
//! Settings live in a `KEY=value` text file (`~/.bcc950_config` by default),
//! one assignment per line. Blank lines and `#` comments are skipped, unknown
//! keys are ignored on load, and a missing file means defaults.

use crate::constants::{
    home_dir, DEFAULT_CONFIG_FILENAME, DEFAULT_DEVICE, DEFAULT_PAN_SPEED, DEFAULT_TILT_SPEED,
    DEFAULT_ZOOM_STEP,
};
use crate::errors::ConfigError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const KEY_DEVICE: &str = "DEVICE";
pub const KEY_PAN_SPEED: &str = "PAN_SPEED";
pub const KEY_TILT_SPEED: &str = "TILT_SPEED";
pub const KEY_ZOOM_STEP: &str = "ZOOM_STEP";

/// Keys recognised when loading a config file
pub const KNOWN_KEYS: [&str; 4] = [KEY_DEVICE, KEY_PAN_SPEED, KEY_TILT_SPEED, KEY_ZOOM_STEP];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_path(Self::default_path())
    }
}

impl Config {
    /// Defaults bound to `path`; nothing is read yet.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        let mut values = BTreeMap::new();
        values.insert(KEY_DEVICE.to_string(), DEFAULT_DEVICE.to_string());
        values.insert(KEY_PAN_SPEED.to_string(), DEFAULT_PAN_SPEED.to_string());
        values.insert(KEY_TILT_SPEED.to_string(), DEFAULT_TILT_SPEED.to_string());
        values.insert(KEY_ZOOM_STEP.to_string(), DEFAULT_ZOOM_STEP.to_string());

        Self {
            path: path.as_ref().to_path_buf(),
            values,
        }
    }

    /// Defaults overlaid with the contents of `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::with_path(path);
        config.load()?;
        Ok(config)
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        home_dir().join(DEFAULT_CONFIG_FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overlay the file contents onto the current values.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Config file not found at {:?}, using defaults", self.path);
                return Ok(());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        self.apply(&contents);
        log::info!("Loaded configuration from {:?}", self.path);
        Ok(())
    }

    /// Apply `KEY=value` lines, keeping only known keys.
    pub fn apply(&mut self, contents: &str) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if KNOWN_KEYS.contains(&key) {
                self.values.insert(key.to_string(), value.trim().to_string());
            } else {
                log::debug!("Ignoring unknown config key {:?}", key);
            }
        }
    }

    /// Write every value as `KEY=value`, in key order.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, self.to_file_string()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Saved configuration to {:?}", self.path);
        Ok(())
    }

    pub fn to_file_string(&self) -> String {
        self.values
            .iter()
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn device(&self) -> &str {
        self.get(KEY_DEVICE).unwrap_or(DEFAULT_DEVICE)
    }

    pub fn set_device(&mut self, value: impl Into<String>) {
        self.set(KEY_DEVICE, value);
    }

    /// Pan speed magnitude used by `pan_left`/`pan_right`.
    pub fn pan_speed(&self) -> i32 {
        self.int_or(KEY_PAN_SPEED, DEFAULT_PAN_SPEED)
    }

    pub fn set_pan_speed(&mut self, value: i32) {
        self.set(KEY_PAN_SPEED, value.to_string());
    }

    /// Tilt speed magnitude used by `tilt_up`/`tilt_down`.
    pub fn tilt_speed(&self) -> i32 {
        self.int_or(KEY_TILT_SPEED, DEFAULT_TILT_SPEED)
    }

    pub fn set_tilt_speed(&mut self, value: i32) {
        self.set(KEY_TILT_SPEED, value.to_string());
    }

    /// Zoom increment used by `zoom_in`/`zoom_out`.
    pub fn zoom_step(&self) -> i32 {
        self.int_or(KEY_ZOOM_STEP, DEFAULT_ZOOM_STEP)
    }

    pub fn set_zoom_step(&mut self, value: i32) {
        self.set(KEY_ZOOM_STEP, value.to_string());
    }

    fn int_or(&self, key: &str, default: i32) -> i32 {
        match self.get(key).map(str::parse::<i32>) {
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                log::warn!(
                    "Config value {}={:?} is not an integer, using {}",
                    key,
                    self.get(key).unwrap_or_default(),
                    default
                );
                default
            }
            None => default,
        }
    }
}
