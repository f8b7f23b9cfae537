use std::path::Path;
use std::sync::Arc;

use logicflow_core::QuestionFactory;
use storage::repository::Storage;

use crate::Clock;
use crate::app_settings_service::AppSettingsService;
use crate::error::AppServicesError;
use crate::progress_ledger::ProgressLedger;
use crate::sessions::SessionEngine;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    ledger: ProgressLedger,
    app_settings: Arc<AppSettingsService>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            clock,
            ledger: ProgressLedger::new(Arc::clone(&storage.progress)),
            app_settings: Arc::new(AppSettingsService::new(Arc::clone(&storage.settings))),
        }
    }

    /// Build services backed by a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the file exists but cannot be loaded.
    pub fn open_json(path: &Path, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::json_file(path)?;
        Ok(Self::from_storage(&storage, clock))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }

    /// A session engine using the persisted question format.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the settings cannot be loaded.
    pub fn session_engine(&self) -> Result<SessionEngine, AppServicesError> {
        let settings = self.app_settings.load()?;
        Ok(
            SessionEngine::new(QuestionFactory::standard(), self.ledger.clone(), self.clock)
                .with_format(settings.question_format()),
        )
    }
}
