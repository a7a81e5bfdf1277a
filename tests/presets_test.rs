#[cfg(test)]
mod preset_tests {
    use bcc950::errors::PresetError;
    use bcc950::{PositionEstimator, Preset, PresetStore};
    use std::fs;
    use tempfile::TempDir;

    fn position(pan: f64, tilt: f64, zoom: i32) -> PositionEstimator {
        Preset::new(pan, tilt, zoom).to_position()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = PresetStore::open(dir.path().join("presets.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.list_presets().is_empty());
        assert_eq!(store.recall_preset("home"), None);
    }

    #[test]
    fn test_save_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");

        let mut store = PresetStore::open(&path).unwrap();
        store.save_preset("desk", &position(1.5, -0.3, 200)).unwrap();
        store.save_preset("door", &position(-4.0, 1.0, 350)).unwrap();

        let reopened = PresetStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.recall_preset("desk"), Some(Preset::new(1.5, -0.3, 200)));
        assert_eq!(reopened.list_presets(), vec!["desk", "door"]);
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let mut store = PresetStore::open(dir.path().join("p.json")).unwrap();
        store.save_preset("home", &position(1.0, 1.0, 100)).unwrap();
        store.save_preset("home", &position(2.0, 0.0, 400)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.recall_preset("home"), Some(Preset::new(2.0, 0.0, 400)));
    }

    #[test]
    fn test_delete_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");

        let mut store = PresetStore::open(&path).unwrap();
        store.save_preset("a", &position(0.0, 0.0, 100)).unwrap();
        store.save_preset("b", &position(0.0, 0.0, 100)).unwrap();

        assert!(store.delete_preset("a").unwrap());
        assert!(!store.delete_preset("a").unwrap());
        assert!(!store.delete_preset("never").unwrap());

        let reopened = PresetStore::open(&path).unwrap();
        assert_eq!(reopened.list_presets(), vec!["b"]);
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        let mut store = PresetStore::open(&path).unwrap();
        store.save_preset("home", &position(2.5, -1.0, 350)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "{\n  \"home\": {\n    \"pan\": 2.5,\n    \"tilt\": -1.0,\n    \"zoom\": 350\n  }\n}\n"
        );
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("presets.json");
        let mut store = PresetStore::open(&path).unwrap();
        store.save_preset("x", &PositionEstimator::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        fs::write(&path, r#"{ "home": { "pan": 1.0 } }"#).unwrap();

        let err = PresetStore::open(&path).unwrap_err();
        assert!(matches!(err, PresetError::Parse { .. }));
        assert!(err.to_string().contains("Malformed presets file"));
    }

    #[test]
    fn test_unwritable_path_is_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        let mut store = PresetStore::open(&path).unwrap();

        // A directory now sits where the file should go
        fs::create_dir(&path).unwrap();
        let err = store
            .save_preset("home", &PositionEstimator::new())
            .unwrap_err();
        assert!(matches!(err, PresetError::Write { .. }));
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        fs::create_dir(&path).unwrap();

        let err = PresetStore::open(&path).unwrap_err();
        assert!(matches!(err, PresetError::Read { .. }));
    }
}
