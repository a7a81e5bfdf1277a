//! Named position presets persisted as JSON
//!
//! The backing file is an object keyed by preset name whose values hold
//! exactly `pan` (float), `tilt` (float) and `zoom` (integer):
//!
//! ```json
//! {
//!   "home": {
//!     "pan": 2.5,
//!     "tilt": -1.0,
//!     "zoom": 350
//!   }
//! }
//! ```
//!
//! Every mutation rewrites the whole file. There is no cross-process locking;
//! the last writer wins.

use crate::constants::{home_dir, DEFAULT_PRESETS_FILENAME};
use crate::errors::PresetError;
use crate::position::{PositionEstimator, Preset};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct PresetStore {
    path: PathBuf,
    presets: BTreeMap<String, Preset>,
}

impl PresetStore {
    /// Open the store at `path` and load it. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PresetError> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            presets: BTreeMap::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Open the store at the default location in the home directory.
    pub fn open_default() -> Result<Self, PresetError> {
        Self::open(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        home_dir().join(DEFAULT_PRESETS_FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory presets with the file contents.
    pub fn load(&mut self) -> Result<(), PresetError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Presets file not found at {:?}, starting empty", self.path);
                self.presets.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(PresetError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        self.presets = parse_presets(&contents).map_err(|source| PresetError::Parse {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Loaded {} presets from {:?}", self.presets.len(), self.path);
        Ok(())
    }

    /// Overwrite the file with the full preset map.
    pub fn save(&self) -> Result<(), PresetError> {
        let json = serialize_presets(&self.presets)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PresetError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| PresetError::Write {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Saved {} presets to {:?}", self.presets.len(), self.path);
        Ok(())
    }

    /// Store `position` under `name`, replacing any existing entry, and persist.
    pub fn save_preset(&mut self, name: &str, position: &PositionEstimator) -> Result<(), PresetError> {
        self.presets.insert(name.to_string(), position.snapshot());
        self.save()
    }

    pub fn recall_preset(&self, name: &str) -> Option<Preset> {
        self.presets.get(name).copied()
    }

    /// Remove `name` and persist. Returns whether it existed.
    pub fn delete_preset(&mut self, name: &str) -> Result<bool, PresetError> {
        if self.presets.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Preset names in sorted order.
    pub fn list_presets(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    pub fn get_all(&self) -> &BTreeMap<String, Preset> {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Parse the two-level preset document. Anything but that exact shape fails.
pub fn parse_presets(json: &str) -> Result<BTreeMap<String, Preset>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Pretty-printed document with 2-space indentation and a trailing newline.
pub fn serialize_presets(presets: &BTreeMap<String, Preset>) -> Result<String, PresetError> {
    let mut json = serde_json::to_string_pretty(presets).map_err(PresetError::Serialize)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_shape() {
        let presets = parse_presets(
            r#"{ "desk": { "zoom": 200, "tilt": -0.3, "pan": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(presets["desk"], Preset::new(1.5, -0.3, 200));
    }

    #[test]
    fn test_parse_empty_object() {
        assert!(parse_presets("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_deviations() {
        let bad = [
            "",
            "[]",
            r#"{ "a": 1 }"#,
            r#"{ "a": { "pan": 1.0, "tilt": 0.0 } }"#,
            r#"{ "a": { "pan": 1.0, "tilt": 0.0, "zoom": 100, "roll": 0 } }"#,
            r#"{ "a": { "pan": "left", "tilt": 0.0, "zoom": 100 } }"#,
            r#"{ "a": { "pan": 1.0, "tilt": 0.0, "zoom": 150.5 } }"#,
            r#"{ "a": { "pan": 1.0, "tilt": 0.0, "zoom": 100 }"#,
        ];
        for doc in bad {
            assert!(parse_presets(doc).is_err(), "accepted: {doc}");
        }
    }

    #[test]
    fn test_serialize_layout() {
        let mut presets = BTreeMap::new();
        presets.insert("b".to_string(), Preset::new(0.5, 0.0, 100));
        presets.insert("a".to_string(), Preset::new(-1.0, 2.0, 300));

        let json = serialize_presets(&presets).unwrap();
        let expected = "{\n  \"a\": {\n    \"pan\": -1.0,\n    \"tilt\": 2.0,\n    \"zoom\": 300\n  },\n  \"b\": {\n    \"pan\": 0.5,\n    \"tilt\": 0.0,\n    \"zoom\": 100\n  }\n}\n";
        assert_eq!(json, expected);
        assert_eq!(parse_presets(&json).unwrap(), presets);
    }
}
