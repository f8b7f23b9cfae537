use std::sync::Arc;

use logicflow_core::model::{Topic, TopicProgress, percent};
use storage::repository::ProgressRepository;
use tracing::info;

use crate::error::LedgerError;

/// Totals across every practised topic.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub topics_started: usize,
    pub total_questions: u64,
    pub correct_answers: u64,
    pub experience: u64,
    /// Lifetime accuracy in percent over all topics.
    pub accuracy: f64,
}

/// Write-through store of per-topic lifetime statistics.
#[derive(Clone)]
pub struct ProgressLedger {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressLedger {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Fold one answer into the topic's record and persist it immediately.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the record cannot be loaded or stored.
    pub fn update(&self, topic: Topic, is_correct: bool) -> Result<TopicProgress, LedgerError> {
        let mut progress = self.get(topic)?;
        progress.record(is_correct);
        self.repo.save_progress(&progress)?;
        Ok(progress)
    }

    /// Clear one topic, or every topic when `None`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if a record cannot be removed.
    pub fn reset(&self, topic: Option<Topic>) -> Result<(), LedgerError> {
        match topic {
            Some(topic) => {
                self.repo.delete_progress(topic)?;
                info!(%topic, "progress reset");
            }
            None => {
                for topic in Topic::ALL {
                    self.repo.delete_progress(topic)?;
                }
                info!("all progress reset");
            }
        }
        Ok(())
    }

    /// Progress for a topic; an empty record if it was never practised.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` on storage failures.
    pub fn get(&self, topic: Topic) -> Result<TopicProgress, LedgerError> {
        Ok(self
            .repo
            .get_progress(topic)?
            .unwrap_or_else(|| TopicProgress::empty(topic)))
    }

    /// One record per catalog topic, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` on storage failures.
    pub fn all(&self) -> Result<Vec<TopicProgress>, LedgerError> {
        Topic::ALL.into_iter().map(|topic| self.get(topic)).collect()
    }

    /// Totals across topics.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` on storage failures.
    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        let stored = self.repo.list_progress()?;
        let total_questions = stored.iter().map(TopicProgress::total_questions).sum();
        let correct_answers = stored.iter().map(TopicProgress::correct_answers).sum();
        Ok(LedgerSummary {
            topics_started: stored.iter().filter(|p| p.is_started()).count(),
            total_questions,
            correct_answers,
            experience: stored.iter().map(TopicProgress::experience).sum(),
            accuracy: percent(correct_answers, total_questions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;

    fn ledger() -> ProgressLedger {
        ProgressLedger::new(Storage::in_memory().progress)
    }

    #[test]
    fn update_accumulates_counts_and_experience() {
        let ledger = ledger();
        ledger.update(Topic::Complement, true).unwrap();
        ledger.update(Topic::Complement, false).unwrap();
        let progress = ledger.update(Topic::Complement, true).unwrap();

        assert_eq!(progress.total_questions(), 3);
        assert_eq!(progress.correct_answers(), 2);
        assert_eq!(progress.experience(), 25);
        assert!((progress.best_accuracy() - 100.0).abs() < f64::EPSILON);
        assert_eq!(ledger.get(Topic::Complement).unwrap(), progress);
    }

    #[test]
    fn best_accuracy_never_drops() {
        let ledger = ledger();
        let mut best = 0.0;
        for correct in [true, false, false, true, false] {
            let progress = ledger.update(Topic::DeMorgan, correct).unwrap();
            assert!(progress.best_accuracy() >= best);
            best = progress.best_accuracy();
        }
    }

    #[test]
    fn reset_one_topic_leaves_the_rest() {
        let ledger = ledger();
        ledger.update(Topic::KMap, true).unwrap();
        ledger.update(Topic::SopPos, false).unwrap();

        ledger.reset(Some(Topic::KMap)).unwrap();
        assert!(!ledger.get(Topic::KMap).unwrap().is_started());
        assert!(ledger.get(Topic::SopPos).unwrap().is_started());

        ledger.reset(None).unwrap();
        assert_eq!(ledger.summary().unwrap().total_questions, 0);
    }

    #[test]
    fn all_lists_every_topic() {
        let ledger = ledger();
        ledger.update(Topic::BcdEncoding, true).unwrap();
        let all = ledger.all().unwrap();
        assert_eq!(all.len(), Topic::ALL.len());
        assert_eq!(all.last().unwrap().total_questions(), 1);
    }

    #[test]
    fn summary_totals_across_topics() {
        let ledger = ledger();
        ledger.update(Topic::BooleanBasic, true).unwrap();
        ledger.update(Topic::NumberConversion, false).unwrap();

        let summary = ledger.summary().unwrap();
        assert_eq!(summary.topics_started, 2);
        assert_eq!(summary.total_questions, 2);
        assert_eq!(summary.correct_answers, 1);
        assert_eq!(summary.experience, 15);
        assert!((summary.accuracy - 50.0).abs() < f64::EPSILON);
    }
}
