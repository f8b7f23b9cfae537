use std::ops::RangeInclusive;

use thiserror::Error;

use crate::model::question::QuestionFormat;

/// Allowed font sizes, in pixels.
pub const FONT_SIZE_RANGE: RangeInclusive<u8> = 12..=24;
pub const DEFAULT_FONT_SIZE: u8 = 16;

/// User preferences persisted under a single fixed key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSettings {
    question_format: QuestionFormat,
    font_size: u8,
    dark_mode: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub question_format: Option<QuestionFormat>,
    pub font_size: Option<u8>,
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("font size must be between 12 and 24, got {provided}")]
    InvalidFontSize { provided: u8 },
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled from existing settings, for partial edits.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            question_format: Some(settings.question_format),
            font_size: Some(settings.font_size),
            dark_mode: Some(settings.dark_mode),
        }
    }

    /// Validate and fill defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the font size is out of range.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let font_size = self.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        if !FONT_SIZE_RANGE.contains(&font_size) {
            return Err(AppSettingsError::InvalidFontSize {
                provided: font_size,
            });
        }

        Ok(AppSettings {
            question_format: self.question_format.unwrap_or_default(),
            font_size,
            dark_mode: self.dark_mode.unwrap_or(false),
        })
    }
}

impl AppSettings {
    /// Rehydrate settings from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the stored values fail validation.
    pub fn from_persisted(draft: AppSettingsDraft) -> Result<Self, AppSettingsError> {
        draft.validate()
    }

    #[must_use]
    pub fn question_format(&self) -> QuestionFormat {
        self.question_format
    }

    #[must_use]
    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            question_format: QuestionFormat::MultipleChoice,
            font_size: DEFAULT_FONT_SIZE,
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_yields_defaults() {
        assert_eq!(AppSettingsDraft::new().validate().unwrap(), AppSettings::default());
    }

    #[test]
    fn font_size_is_bounded() {
        let draft = AppSettingsDraft {
            font_size: Some(30),
            ..AppSettingsDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            AppSettingsError::InvalidFontSize { provided: 30 }
        );
    }

    #[test]
    fn partial_edit_keeps_other_fields() {
        let base = AppSettingsDraft {
            dark_mode: Some(true),
            font_size: Some(20),
            ..AppSettingsDraft::default()
        }
        .validate()
        .unwrap();

        let mut draft = AppSettingsDraft::from_settings(&base);
        draft.question_format = Some(QuestionFormat::FillIn);
        let edited = draft.validate().unwrap();

        assert_eq!(edited.question_format(), QuestionFormat::FillIn);
        assert_eq!(edited.font_size(), 20);
        assert!(edited.dark_mode());
    }
}
