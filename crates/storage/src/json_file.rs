use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::repository::{KeyValueStore, Storage, StorageError};

/// Key-value store persisted as a single pretty-printed JSON object.
///
/// The whole document is loaded when the store is opened and written back
/// after every mutation, so the file always reflects the last write.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read, or
    /// `StorageError::Serialization` if it is not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened json store");
        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).map(Value::to_string))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let value: Value = serde_json::from_str(&value)?;
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut next = guard.clone();
        next.insert(key.to_owned(), value);
        self.flush(&next)?;
        *guard = next;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(key) {
            let mut next = guard.clone();
            next.remove(key);
            self.flush(&next)?;
            *guard = next;
        }
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be loaded.
    pub fn json_file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::from_store(JsonFileStore::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonFileStore>();
    }
}
