//! JSON file backed key-value store
//!
//! All keys live in one JSON object on disk. Writes go to a temporary file
//! that is renamed over the original, so a crash never leaves half a file.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use jarvis::{KeyValueStore, StoreError};
use serde_json::{Map, Value};

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store file inside a data directory, created on first write
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            other => {
                tracing::warn!(
                    "Ignoring non-object store file {} ({})",
                    self.path.display(),
                    other
                );
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jarvis::KeyValueStoreExt;

    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert_eq!(store.get("todo").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");

        JsonFileStore::in_dir(&nested)
            .set_as("visible_lights", &["Desk", "Bedroom"])
            .unwrap();

        let reopened = JsonFileStore::in_dir(&nested);
        let lights: Vec<String> = reopened.get_as("visible_lights").unwrap().unwrap();
        assert_eq!(lights, vec!["Desk", "Bedroom"]);
    }

    #[test]
    fn test_clear_only_removes_one_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        store.set_as("todo", &vec!["buy milk"]).unwrap();
        store.set_as("visible_lights", &vec!["Desk"]).unwrap();

        store.clear("todo").unwrap();

        assert!(store.get("todo").unwrap().is_none());
        assert!(store.get("visible_lights").unwrap().is_some());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.get("todo"), Err(StoreError::Serialization(_))));
    }
}
