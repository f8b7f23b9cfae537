use std::sync::Arc;

use logicflow_core::model::{AppSettings, AppSettingsDraft, QuestionFormat};
use storage::repository::AppSettingsRepository;

use crate::error::AppSettingsServiceError;

#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn AppSettingsRepository>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppSettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub fn load(&self) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = self.repo.get_settings()?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if validation fails or persistence fails.
    pub fn save(&self, draft: AppSettingsDraft) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings)?;
        Ok(settings)
    }

    /// Change only the preferred question format.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub fn set_question_format(
        &self,
        format: QuestionFormat,
    ) -> Result<AppSettings, AppSettingsServiceError> {
        let current = self.load()?;
        let draft = AppSettingsDraft {
            question_format: Some(format),
            ..AppSettingsDraft::from_settings(&current)
        };
        self.save(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;

    #[test]
    fn load_defaults_when_nothing_saved() {
        let service = AppSettingsService::new(Storage::in_memory().settings);
        assert_eq!(service.load().unwrap(), AppSettings::default());
    }

    #[test]
    fn set_question_format_keeps_other_fields() {
        let service = AppSettingsService::new(Storage::in_memory().settings);
        service
            .save(AppSettingsDraft {
                font_size: Some(22),
                ..AppSettingsDraft::new()
            })
            .unwrap();

        let updated = service.set_question_format(QuestionFormat::FillIn).unwrap();
        assert_eq!(updated.font_size(), 22);
        assert_eq!(service.load().unwrap().question_format(), QuestionFormat::FillIn);
    }

    #[test]
    fn invalid_font_size_is_not_persisted() {
        let service = AppSettingsService::new(Storage::in_memory().settings);
        let err = service
            .save(AppSettingsDraft {
                font_size: Some(8),
                ..AppSettingsDraft::new()
            })
            .unwrap_err();
        assert!(matches!(err, AppSettingsServiceError::Settings(_)));
        assert_eq!(service.load().unwrap(), AppSettings::default());
    }
}
