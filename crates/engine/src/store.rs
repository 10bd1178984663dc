//! Best-time persistence in a small JSON key/value file.
//!
//! The file holds one JSON object; the best time lives under
//! [`BEST_TIME_KEY`] as a number of seconds. Other keys are preserved on
//! save so the file can be shared.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{BestTimeStore, StoreError};
use crate::types::BEST_TIME_KEY;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: BEST_TIME_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Corrupt(format!("expected object, found {other}"))),
            Err(e) => Err(StoreError::Corrupt(e.to_string())),
        }
    }
}

impl BestTimeStore for JsonFileStore {
    fn load(&self) -> Result<Option<f64>, StoreError> {
        let map = self.read_map()?;
        match map.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            // Older saves may hold the number as a string.
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| StoreError::Corrupt(format!("{} = {s:?}", self.key))),
            Some(other) => Err(StoreError::Corrupt(format!("{} = {other}", self.key))),
        }
    }

    fn save(&mut self, seconds: f64) -> Result<(), StoreError> {
        let number = serde_json::Number::from_f64(seconds)
            .ok_or_else(|| StoreError::Corrupt(format!("cannot store {seconds}")))?;
        // A corrupt file is replaced rather than blocking new records.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(self.key.clone(), Value::Number(number));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), seconds, "best time saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::core::{load_best, record_time};

    #[test]
    fn test_missing_file_has_no_best() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().join("missing.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("save.json");
        let mut store = JsonFileStore::new(&path);
        store.save(12.3).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), Some(12.3));
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("shared.json");
        fs::write(&path, r#"{"volume": 3}"#).unwrap();
        let mut store = JsonFileStore::new(&path);
        store.save(9.5).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["volume"], 3);
        assert_eq!(value[BEST_TIME_KEY], 9.5);
    }

    #[test]
    fn test_string_value_is_accepted() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("string.json");
        fs::write(&path, format!(r#"{{"{BEST_TIME_KEY}": "14.2"}}"#)).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), Some(14.2));
    }

    #[test]
    fn test_corrupt_file_is_reported_and_ignored() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("corrupt.json");
        fs::write(&path, "not json").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
        assert_eq!(load_best(&store), None);

        let outcome = record_time(&mut store, 20.0);
        assert!(outcome.new_best);
        assert_eq!(store.load().unwrap(), Some(20.0));
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("profile").join("best.json");
        let mut store = JsonFileStore::new(&path);
        store.save(31.4).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), Some(31.4));
    }
}
