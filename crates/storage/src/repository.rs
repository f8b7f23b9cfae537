use logicflow_core::model::{AppSettings, Topic, TopicProgress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::records::{ProgressRecord, SettingsRecord};

/// Key under which the settings record is stored.
pub const SETTINGS_KEY: &str = "settings";

/// Key under which a topic's progress record is stored, e.g. `progress/demorgan`.
#[must_use]
pub fn progress_key(topic: Topic) -> String {
    format!("progress/{}", topic.id())
}

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

//
// ─── PORTS ─────────────────────────────────────────────────────────────────────
//

/// String-keyed store of JSON documents.
///
/// Every backend the app runs on provides this much; the typed repositories
/// below are implemented once on top of it.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw JSON stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Repository contract for per-topic progress.
pub trait ProgressRepository: Send + Sync {
    /// Fetch progress for a topic, `None` if the topic was never practised.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    fn get_progress(&self, topic: Topic) -> Result<Option<TopicProgress>, StorageError>;

    /// Persist or replace progress for its topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    fn save_progress(&self, progress: &TopicProgress) -> Result<(), StorageError>;

    /// Remove progress for a topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    fn delete_progress(&self, topic: Topic) -> Result<(), StorageError>;

    /// Every stored progress record, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any record cannot be read or decoded.
    fn list_progress(&self) -> Result<Vec<TopicProgress>, StorageError> {
        let mut all = Vec::new();
        for topic in Topic::ALL {
            if let Some(progress) = self.get_progress(topic)? {
                all.push(progress);
            }
        }
        Ok(all)
    }
}

pub trait AppSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

impl<S: KeyValueStore> ProgressRepository for S {
    fn get_progress(&self, topic: Topic) -> Result<Option<TopicProgress>, StorageError> {
        let Some(raw) = self.get(&progress_key(topic))? else {
            return Ok(None);
        };
        let record: ProgressRecord = serde_json::from_str(&raw)?;
        record.into_progress(topic).map(Some)
    }

    fn save_progress(&self, progress: &TopicProgress) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&ProgressRecord::from_progress(progress))?;
        self.set(&progress_key(progress.topic()), raw)
    }

    fn delete_progress(&self, topic: Topic) -> Result<(), StorageError> {
        self.delete(&progress_key(topic))
    }
}

impl<S: KeyValueStore> AppSettingsRepository for S {
    fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let Some(raw) = self.get(SETTINGS_KEY)? else {
            return Ok(None);
        };
        let record: SettingsRecord = serde_json::from_str(&raw)?;
        record.into_settings().map(Some)
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&SettingsRecord::from_settings(settings))?;
        self.set(SETTINGS_KEY, raw)
    }
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub settings: Arc<dyn AppSettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    /// Share one key-value backend between every repository.
    pub fn from_store<S>(store: S) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        let progress: Arc<dyn ProgressRepository> = Arc::new(store.clone());
        let settings: Arc<dyn AppSettingsRepository> = Arc::new(store);
        Self { progress, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicflow_core::model::{AppSettingsDraft, QuestionFormat};

    #[test]
    fn round_trips_progress_under_topic_key() {
        let store = InMemoryStore::new();
        let mut progress = TopicProgress::empty(Topic::DeMorgan);
        progress.record(true);
        progress.record(false);

        store.save_progress(&progress).unwrap();
        assert!(store.get("progress/demorgan").unwrap().is_some());

        let fetched = store.get_progress(Topic::DeMorgan).unwrap().unwrap();
        assert_eq!(fetched, progress);
        assert!(store.get_progress(Topic::KMap).unwrap().is_none());
    }

    #[test]
    fn list_progress_follows_catalog_order() {
        let store = InMemoryStore::new();
        store
            .save_progress(&TopicProgress::empty(Topic::BcdEncoding))
            .unwrap();
        store
            .save_progress(&TopicProgress::empty(Topic::BooleanBasic))
            .unwrap();

        let topics: Vec<Topic> = store
            .list_progress()
            .unwrap()
            .iter()
            .map(TopicProgress::topic)
            .collect();
        assert_eq!(topics, vec![Topic::BooleanBasic, Topic::BcdEncoding]);
    }

    #[test]
    fn delete_missing_key_is_ok() {
        let store = InMemoryStore::new();
        store.delete_progress(Topic::Complement).unwrap();
        assert!(store.list_progress().unwrap().is_empty());
    }

    #[test]
    fn settings_round_trip() {
        let storage = Storage::in_memory();
        assert!(storage.settings.get_settings().unwrap().is_none());

        let settings = AppSettingsDraft {
            question_format: Some(QuestionFormat::FillIn),
            font_size: Some(20),
            dark_mode: Some(true),
        }
        .validate()
        .unwrap();
        storage.settings.save_settings(&settings).unwrap();

        assert_eq!(storage.settings.get_settings().unwrap(), Some(settings));
    }

    #[test]
    fn corrupt_record_is_a_serialization_error() {
        let store = InMemoryStore::new();
        store.set("progress/k-map", "{not json".into()).unwrap();
        let err = store.get_progress(Topic::KMap).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
