use thiserror::Error;

use crate::model::topic::Topic;

/// Experience awarded for a correct answer.
pub const XP_CORRECT: u64 = 10;
/// Experience awarded for an incorrect attempt.
pub const XP_ATTEMPT: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u64, total: u64 },

    #[error("best accuracy must be within 0..=100, got {provided}")]
    InvalidAccuracy { provided: f64 },
}

/// Lifetime statistics for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicProgress {
    topic: Topic,
    total_questions: u64,
    correct_answers: u64,
    best_accuracy: f64,
    experience: u64,
}

impl TopicProgress {
    /// A topic nobody has practised yet.
    #[must_use]
    pub fn empty(topic: Topic) -> Self {
        Self {
            topic,
            total_questions: 0,
            correct_answers: 0,
            best_accuracy: 0.0,
            experience: 0,
        }
    }

    /// Rehydrate progress from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the counters are inconsistent.
    pub fn from_persisted(
        topic: Topic,
        total_questions: u64,
        correct_answers: u64,
        best_accuracy: f64,
        experience: u64,
    ) -> Result<Self, ProgressError> {
        if correct_answers > total_questions {
            return Err(ProgressError::CorrectExceedsTotal {
                correct: correct_answers,
                total: total_questions,
            });
        }
        if !(0.0..=100.0).contains(&best_accuracy) {
            return Err(ProgressError::InvalidAccuracy {
                provided: best_accuracy,
            });
        }
        Ok(Self {
            topic,
            total_questions,
            correct_answers,
            best_accuracy,
            experience,
        })
    }

    /// Fold one answered question into the aggregate.
    pub fn record(&mut self, is_correct: bool) {
        self.total_questions = self.total_questions.saturating_add(1);
        if is_correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        }
        self.best_accuracy = self.best_accuracy.max(self.accuracy());
        let reward = if is_correct { XP_CORRECT } else { XP_ATTEMPT };
        self.experience = self.experience.saturating_add(reward);
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn total_questions(&self) -> u64 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> u64 {
        self.correct_answers
    }

    #[must_use]
    pub fn best_accuracy(&self) -> f64 {
        self.best_accuracy
    }

    #[must_use]
    pub fn experience(&self) -> u64 {
        self.experience
    }

    /// Lifetime accuracy in percent; 0 before the first answer.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        percent(self.correct_answers, self.total_questions)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.total_questions > 0
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
