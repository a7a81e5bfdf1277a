use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the control interface of the camera.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device not open")]
    NotOpen,
    #[error("Failed to open device {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{op} failed for control {id:#010x}: {source}")]
    Ioctl {
        op: &'static str,
        id: u32,
        #[source]
        source: io::Error,
    },
    #[error("Control {id:#010x} is not supported by this device")]
    UnsupportedControl { id: u32 },
    #[error("Control {id:#010x} returned a non-integer value")]
    UnexpectedValue { id: u32 },
    #[error("Device lock poisoned by previous panic")]
    PoisonedLock,
    #[error("Device backend error: {0}")]
    Backend(String),
}

/// Failure loading or persisting the preset file.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Cannot read presets file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed presets file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot write presets file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize presets: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failure reading or writing the key=value config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Any error surfaced by [`crate::Controller`].
#[derive(Debug, Error)]
pub enum Bcc950Error {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    Preset(#[from] PresetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unknown control name: {0}")]
    UnknownControl(String),
}

pub type Result<T, E = Bcc950Error> = std::result::Result<T, E>;
