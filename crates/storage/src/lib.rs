#![forbid(unsafe_code)]

pub mod json_file;
mod records;
pub mod repository;

pub use json_file::JsonFileStore;
pub use repository::{
    AppSettingsRepository, InMemoryStore, KeyValueStore, ProgressRepository, Storage,
    StorageError,
};
