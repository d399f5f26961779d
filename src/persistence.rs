//! On-device key-value storage for JSON values
//!
//! The store is opaque to callers: a key maps to one serialized JSON value.
//! `FileStore` keeps one file per key under the data directory,
//! `MemoryStore` backs ephemeral sessions.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::storage::FILE_EXTENSION;
use crate::error::StorageError;

/// Raw string get/set by key
pub trait Storage {
    /// Returns `Ok(None)` when nothing has been stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON value stored under `key`
pub fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Deserialize { key: key.to_string(), source })
}

/// Encode `value` as JSON and store it under `key`
pub fn write_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|source| StorageError::Serialize { key: key.to_string(), source })?;
    storage.set(key, &raw)
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data dir (e.g. ~/.local/share/virtual-art-gallery)
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path
    }

    /// "@favorites" -> "<dir>/favorites.json"
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .trim_start_matches('@')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.{FILE_EXTENSION}"))
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { key: key.to_string(), source };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write to a sibling temp file, then rename over the target
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{FILE_EXTENSION}.tmp"));
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;

        debug!(key = %key, path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Session-only store, nothing reaches the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("@favorites").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("@favorites", r#"{"7":{"id":7}}"#).unwrap();
        assert_eq!(store.get("@favorites").unwrap().as_deref(), Some(r#"{"7":{"id":7}}"#));

        // Key is mapped to a plain file name, no temp file left behind
        assert!(dir.path().join("nested/favorites.json").exists());
        assert!(!dir.path().join("nested/favorites.json.tmp").exists());
    }

    #[test]
    fn test_file_store_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("@favorites", "a much longer first value").unwrap();
        store.set("@favorites", "short").unwrap();
        assert_eq!(store.get("@favorites").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_file_store_unsafe_key_characters() {
        let store = FileStore::new("/tmp/store");
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/tmp/store/___etc_passwd.json"));
    }

    #[test]
    fn test_read_json_reports_corrupt_value() {
        let store = MemoryStore::new();
        store.set("@favorites", "{not json").unwrap();

        let result = read_json::<BTreeMap<String, u32>>(&store, "@favorites");
        assert!(matches!(result, Err(StorageError::Deserialize { .. })));
    }

    #[test]
    fn test_json_helpers_round_trip() {
        let store = MemoryStore::new();
        let value = BTreeMap::from([("1".to_string(), 10u32), ("2".to_string(), 20)]);

        write_json(&store, "numbers", &value).unwrap();
        let restored: Option<BTreeMap<String, u32>> = read_json(&store, "numbers").unwrap();
        assert_eq!(restored, Some(value));
    }
}
