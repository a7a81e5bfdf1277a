#[cfg(test)]
mod error_tests {
    use bcc950::errors::{Bcc950Error, ConfigError, DeviceError, PresetError};
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_device_error_display() {
        assert_eq!(DeviceError::NotOpen.to_string(), "Device not open");
        assert_eq!(
            DeviceError::UnsupportedControl { id: 0x009a_0920 }.to_string(),
            "Control 0x009a0920 is not supported by this device"
        );
        assert_eq!(
            DeviceError::Backend("boom".to_string()).to_string(),
            "Device backend error: boom"
        );
    }

    #[test]
    fn test_open_error_keeps_source() {
        let error = DeviceError::Open {
            path: PathBuf::from("/dev/video0"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such device"),
        };
        assert!(error.to_string().contains("/dev/video0"));
        assert!(error.to_string().contains("no such device"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_ioctl_error_names_operation() {
        let error = DeviceError::Ioctl {
            op: "VIDIOC_S_CTRL",
            id: 0x009a_090d,
            source: io::Error::new(io::ErrorKind::Other, "EINVAL"),
        };
        assert_eq!(
            error.to_string(),
            "VIDIOC_S_CTRL failed for control 0x009a090d: EINVAL"
        );
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let error: Bcc950Error = DeviceError::NotOpen.into();
        assert_eq!(error.to_string(), "Device not open");

        let error: Bcc950Error = ConfigError::Write {
            path: PathBuf::from("/tmp/cfg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(error.to_string().starts_with("Cannot write config file /tmp/cfg"));
    }

    #[test]
    fn test_preset_parse_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = PresetError::Parse {
            path: PathBuf::from("presets.json"),
            source,
        };
        assert!(error.to_string().starts_with("Malformed presets file presets.json"));
    }

    #[test]
    fn test_unknown_control() {
        let error = Bcc950Error::UnknownControl("warp".to_string());
        assert_eq!(error.to_string(), "Unknown control name: warp");
        assert!(error.source().is_none());
    }
}
