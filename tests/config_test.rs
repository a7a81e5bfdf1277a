#[cfg(test)]
mod config_tests {
    use bcc950::config::{Config, KEY_DEVICE};
    use bcc950::errors::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_file(dir.path().join("absent")).unwrap();
        assert_eq!(config.device(), "/dev/video0");
        assert_eq!(config.pan_speed(), 1);
        assert_eq!(config.tilt_speed(), 1);
        assert_eq!(config.zoom_step(), 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "# BCC950\nDEVICE=/dev/video3\nZOOM_STEP=40\nEXTRA=1\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.device(), "/dev/video3");
        assert_eq!(config.zoom_step(), 40);
        assert_eq!(config.pan_speed(), 1);
        assert_eq!(config.get("EXTRA"), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config");

        let mut config = Config::with_path(&path);
        config.set_device("/dev/video9");
        config.set_pan_speed(1);
        config.set_tilt_speed(1);
        config.set_zoom_step(25);
        config.save().unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get(KEY_DEVICE), Some("/dev/video9"));
    }

    #[test]
    fn test_save_to_directory_fails() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_path(dir.path());
        assert!(matches!(config.save(), Err(ConfigError::Write { .. })));
    }

    #[test]
    fn test_read_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load_from_file(dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }
}
