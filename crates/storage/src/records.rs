//! Persisted JSON shapes, kept separate from the domain types so the stored
//! format can stay stable while the domain evolves.

use logicflow_core::model::{AppSettings, AppSettingsDraft, QuestionFormat, Topic, TopicProgress};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressRecord {
    pub chapter_id: Topic,
    pub total_questions: u64,
    pub correct_answers: u64,
    pub best_accuracy: f64,
    pub experience: u64,
}

impl ProgressRecord {
    pub(crate) fn from_progress(progress: &TopicProgress) -> Self {
        Self {
            chapter_id: progress.topic(),
            total_questions: progress.total_questions(),
            correct_answers: progress.correct_answers(),
            best_accuracy: progress.best_accuracy(),
            experience: progress.experience(),
        }
    }

    /// Convert back into the domain type, checking the record belongs to `key_topic`.
    pub(crate) fn into_progress(self, key_topic: Topic) -> Result<TopicProgress, StorageError> {
        if self.chapter_id != key_topic {
            return Err(StorageError::Serialization(format!(
                "record for {} stored under {key_topic}",
                self.chapter_id
            )));
        }
        TopicProgress::from_persisted(
            self.chapter_id,
            self.total_questions,
            self.correct_answers,
            self.best_accuracy,
            self.experience,
        )
        .map_err(ser)
    }
}

/// Settings record; absent fields fall back to defaults on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SettingsRecord {
    pub question_type: Option<QuestionFormat>,
    pub font_size: Option<u8>,
    pub dark_mode: Option<bool>,
}

impl SettingsRecord {
    pub(crate) fn from_settings(settings: &AppSettings) -> Self {
        Self {
            question_type: Some(settings.question_format()),
            font_size: Some(settings.font_size()),
            dark_mode: Some(settings.dark_mode()),
        }
    }

    pub(crate) fn into_settings(self) -> Result<AppSettings, StorageError> {
        AppSettings::from_persisted(AppSettingsDraft {
            question_format: self.question_type,
            font_size: self.font_size,
            dark_mode: self.dark_mode,
        })
        .map_err(ser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_record_uses_camel_case_fields() {
        let mut progress = TopicProgress::empty(Topic::SopPos);
        progress.record(true);
        let json = serde_json::to_value(ProgressRecord::from_progress(&progress)).unwrap();
        assert_eq!(json["chapterId"], "sop-pos");
        assert_eq!(json["totalQuestions"], 1);
        assert_eq!(json["experience"], 10);
    }

    #[test]
    fn mismatched_topic_is_rejected() {
        let record = ProgressRecord::from_progress(&TopicProgress::empty(Topic::SopPos));
        assert!(record.into_progress(Topic::KMap).is_err());
    }

    #[test]
    fn inconsistent_counters_are_rejected() {
        let record = ProgressRecord {
            chapter_id: Topic::Complement,
            total_questions: 1,
            correct_answers: 2,
            best_accuracy: 0.0,
            experience: 0,
        };
        assert!(matches!(
            record.into_progress(Topic::Complement),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let record: SettingsRecord = serde_json::from_str(r#"{"darkMode":true}"#).unwrap();
        let settings = record.into_settings().unwrap();
        assert!(settings.dark_mode());
        assert_eq!(settings.font_size(), 16);
        assert_eq!(settings.question_format(), QuestionFormat::MultipleChoice);
    }

    #[test]
    fn out_of_range_font_is_rejected() {
        let record: SettingsRecord = serde_json::from_str(r#"{"fontSize":40}"#).unwrap();
        assert!(record.into_settings().is_err());
    }
}
