use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::ids::QuestionId;
use crate::model::progress::percent;
use crate::model::question::{Answer, Question, QuestionFormat};
use crate::model::topic::Topic;
use crate::time::elapsed_secs;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of the practice screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started.
    Loading,
    /// At least one question, not yet ended.
    Active,
    /// `ended_at` is set.
    Ended,
}

/// Last answer submitted for a question, with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub answer: Answer,
    pub is_correct: bool,
}

/// Outcome of recording an answer on the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub is_correct: bool,
    /// True when this was the first answer recorded for the question.
    pub first_answer: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed run of sequential questions for a single topic.
///
/// Questions are append-only. `correct_count` only counts the first answer
/// recorded per question, so re-answering cannot inflate it.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSession {
    topic: Topic,
    format: QuestionFormat,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<QuestionId, RecordedAnswer>,
    correct_count: usize,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    solution_shown: bool,
    hint_shown: bool,
}

impl PracticeSession {
    /// Opens a session over a prepared batch.
    ///
    /// An empty batch produces a session that is already ended.
    #[must_use]
    pub fn new(
        topic: Topic,
        format: QuestionFormat,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let ended_at = questions.is_empty().then_some(started_at);
        Self {
            topic,
            format,
            questions,
            current_index: 0,
            answers: HashMap::new(),
            correct_count: 0,
            started_at,
            ended_at,
            solution_shown: false,
            hint_shown: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.ended_at.is_some() {
            SessionState::Ended
        } else {
            SessionState::Active
        }
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn format(&self) -> QuestionFormat {
        self.format
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn answer_for(&self, id: &QuestionId) -> Option<&RecordedAnswer> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn solution_shown(&self) -> bool {
        self.solution_shown
    }

    #[must_use]
    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    /// Whether the pointer sits on the last question of the sequence.
    #[must_use]
    pub fn at_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Session accuracy in percent over the questions already passed.
    ///
    /// The denominator is `current_index`, not the number answered; the
    /// question on screen does not count yet.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        percent(self.correct_count as u64, self.current_index as u64)
    }

    /// Record an answer for the current question. `None` once ended.
    pub fn record_answer(&mut self, answer: Answer) -> Option<AnswerRecord> {
        if self.is_ended() {
            return None;
        }
        let question = self.questions.get(self.current_index)?;
        let is_correct = question.is_correct(&answer);
        let question_id = question.id().clone();

        let first_answer = self
            .answers
            .insert(question_id.clone(), RecordedAnswer { answer, is_correct })
            .is_none();
        if first_answer && is_correct {
            self.correct_count += 1;
        }

        Some(AnswerRecord {
            question_id,
            is_correct,
            first_answer,
        })
    }

    /// Move to the next already-generated question, if there is one.
    pub fn step_forward(&mut self) -> bool {
        if self.is_ended() || self.at_last_question() {
            return false;
        }
        self.current_index += 1;
        self.clear_reveals();
        true
    }

    /// Append a freshly generated question and move onto it.
    pub fn push_and_advance(&mut self, question: Question) {
        if self.is_ended() {
            return;
        }
        self.questions.push(question);
        self.current_index = self.questions.len() - 1;
        self.clear_reveals();
    }

    /// Move back one question; no-op on the first question.
    pub fn retreat(&mut self) -> bool {
        if self.is_ended() || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.clear_reveals();
        true
    }

    /// End the session. Keeps the first end time if already ended.
    pub fn finish(&mut self, at: DateTime<Utc>) {
        if self.ended_at.is_none() {
            self.ended_at = Some(at);
        }
    }

    pub fn reveal_solution(&mut self) {
        self.solution_shown = true;
    }

    pub fn reveal_hint(&mut self) {
        self.hint_shown = true;
    }

    fn clear_reveals(&mut self) {
        self.solution_shown = false;
        self.hint_shown = false;
    }

    /// Position indicator for the progress bar.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let position = if total == 0 { 0 } else { self.current_index + 1 };
        SessionProgress {
            position,
            total,
            percent: percent(position as u64, total as u64),
            accuracy: self.accuracy(),
            state: self.state(),
        }
    }

    /// End-of-session statistics; `now` is used while the session is still open.
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> SessionSummary {
        let total = self.questions.len();
        let finished = self.ended_at.unwrap_or(now);
        SessionSummary {
            topic: self.topic,
            total_questions: total,
            correct: self.correct_count,
            incorrect: total.saturating_sub(self.correct_count),
            accuracy: percent(self.correct_count as u64, total as u64),
            time_spent_secs: elapsed_secs(self.started_at, finished),
        }
    }
}

//
// ─── VIEWS ─────────────────────────────────────────────────────────────────────
//

/// Progress bar values for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProgress {
    /// One-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub percent: f64,
    pub accuracy: f64,
    pub state: SessionState,
}

/// Statistics shown when a session ends.
///
/// Unlike the live accuracy, this divides by every question in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub topic: Topic,
    pub total_questions: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f64,
    pub time_spent_secs: u64,
}
