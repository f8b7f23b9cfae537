#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_settings_service;
pub mod error;
pub mod progress_ledger;
pub mod sessions;

pub use logicflow_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use error::{AppServicesError, AppSettingsServiceError, LedgerError};
pub use progress_ledger::{LedgerSummary, ProgressLedger};
pub use sessions::{AdvanceOutcome, DEFAULT_BATCH_SIZE, Seeding, SessionEngine};
