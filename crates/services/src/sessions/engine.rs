use logicflow_core::QuestionFactory;
use logicflow_core::generator::replay_seed;
use logicflow_core::model::{
    Answer, AnswerRecord, PracticeSession, Question, QuestionFormat, SessionProgress,
    SessionState, SessionSummary, Topic,
};
use tracing::{debug, info, warn};

use crate::Clock;
use crate::progress_ledger::ProgressLedger;

/// Questions generated up front when a session starts.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Where question seeds come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Seeding {
    /// Clock and random perturbation; every session differs.
    #[default]
    Entropy,
    /// Question `i` of a session uses `replay_seed(base, i)`, so sessions replay exactly.
    Fixed(u64),
}

/// Result of `SessionEngine::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved onto an already generated question.
    Moved,
    /// Generated a new question at the end and moved onto it.
    Appended,
    /// The topic has no generator; the session is now ended.
    Ended,
    /// Generation kept failing; nothing changed.
    Stalled,
    /// No active session.
    Ignored,
}

/// Drives one practice session at a time: generation, answering,
/// navigation and write-through progress.
///
/// Transitions never fail. Moves that make no sense in the current state
/// are ignored.
pub struct SessionEngine {
    clock: Clock,
    factory: QuestionFactory,
    ledger: ProgressLedger,
    format: QuestionFormat,
    batch_size: usize,
    seeding: Seeding,
    session: Option<PracticeSession>,
}

impl SessionEngine {
    #[must_use]
    pub fn new(factory: QuestionFactory, ledger: ProgressLedger, clock: Clock) -> Self {
        Self {
            clock,
            factory: factory.with_clock(clock),
            ledger,
            format: QuestionFormat::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            seeding: Seeding::Entropy,
            session: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: QuestionFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Format used by the next `start`.
    pub fn set_format(&mut self, format: QuestionFormat) {
        self.format = format;
    }

    #[must_use]
    pub fn format(&self) -> QuestionFormat {
        self.format
    }

    #[must_use]
    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    //
    // ─── LIFECYCLE ─────────────────────────────────────────────────────────────
    //

    /// Start a fresh session on `topic`, replacing any current one.
    ///
    /// A topic that yields no questions starts an already ended session.
    pub fn start(&mut self, topic: Topic) -> &PracticeSession {
        let questions = match self.seeding {
            Seeding::Entropy => {
                self.factory
                    .generate_questions(topic, self.format, self.batch_size)
            }
            Seeding::Fixed(base) => {
                let seeds = (0..self.batch_size as u64).map(|i| replay_seed(base, i));
                self.factory
                    .generate_questions_from(topic, self.format, seeds)
            }
        };
        self.start_with_questions(topic, questions)
    }

    /// Start a session over a prepared batch (replays and tests).
    pub fn start_with_questions(
        &mut self,
        topic: Topic,
        questions: Vec<Question>,
    ) -> &PracticeSession {
        info!(%topic, question_format = %self.format, questions = questions.len(), "session started");
        self.session
            .insert(PracticeSession::new(topic, self.format, questions, self.clock.now()))
    }

    /// End the current session and return its summary.
    pub fn end(&mut self) -> Option<SessionSummary> {
        let now = self.clock.now();
        let session = self.session.as_mut()?;
        if !session.is_ended() {
            session.finish(now);
            info!(topic = %session.topic(), correct = session.correct_count(), "session ended");
        }
        Some(session.summary(now))
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────────
    //

    /// Grade `answer` against the current question.
    ///
    /// Only the first answer per question counts toward the session score and
    /// the progress ledger. Ledger failures are logged and do not affect the
    /// session.
    pub fn submit_answer(&mut self, answer: Answer) -> Option<AnswerRecord> {
        let session = self.session.as_mut()?;
        let record = session.record_answer(answer)?;
        debug!(
            question = %record.question_id,
            correct = record.is_correct,
            first = record.first_answer,
            "answer recorded"
        );
        if record.first_answer {
            if let Err(err) = self.ledger.update(session.topic(), record.is_correct) {
                warn!(topic = %session.topic(), error = %err, "failed to update progress");
            }
        }
        Some(record)
    }

    pub fn show_solution(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reveal_solution();
        }
    }

    pub fn show_hint(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reveal_hint();
        }
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Move forward, generating a new question past the end of the batch.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let Some(session) = self.session.as_mut() else {
            return AdvanceOutcome::Ignored;
        };
        if session.is_ended() {
            return AdvanceOutcome::Ignored;
        }
        if session.step_forward() {
            return AdvanceOutcome::Moved;
        }

        let seed = match self.seeding {
            Seeding::Entropy => None,
            Seeding::Fixed(base) => Some(replay_seed(base, session.questions().len() as u64)),
        };
        match self
            .factory
            .generate_question(session.topic(), session.format(), seed)
        {
            Ok(Some(question)) => {
                session.push_and_advance(question);
                AdvanceOutcome::Appended
            }
            Ok(None) => {
                session.finish(self.clock.now());
                info!(topic = %session.topic(), "no generator, session ended");
                AdvanceOutcome::Ended
            }
            Err(err) => {
                warn!(topic = %session.topic(), error = %err, "could not generate next question");
                AdvanceOutcome::Stalled
            }
        }
    }

    /// Move back one question. `false` on the first question or without a session.
    pub fn retreat(&mut self) -> bool {
        self.session.as_mut().is_some_and(PracticeSession::retreat)
    }

    //
    // ─── VIEWS ─────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn session(&self) -> Option<&PracticeSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Loading, PracticeSession::state)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref()?.current_question()
    }

    /// Live accuracy in percent; zero without a session.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.session
            .as_ref()
            .map_or(0.0, PracticeSession::accuracy)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.as_ref().map_or(
            SessionProgress {
                position: 0,
                total: 0,
                percent: 0.0,
                accuracy: 0.0,
                state: SessionState::Loading,
            },
            PracticeSession::progress,
        )
    }

    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        Some(self.session.as_ref()?.summary(self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicflow_core::time::fixed_clock;
    use storage::repository::Storage;

    fn engine() -> SessionEngine {
        SessionEngine::new(
            QuestionFactory::standard(),
            ProgressLedger::new(Storage::in_memory().progress),
            fixed_clock(),
        )
        .with_seeding(Seeding::Fixed(0))
    }

    #[test]
    fn loading_state_ignores_every_move() {
        let mut engine = engine();
        assert_eq!(engine.state(), SessionState::Loading);
        assert!(engine.submit_answer(Answer::text("A")).is_none());
        assert_eq!(engine.advance(), AdvanceOutcome::Ignored);
        assert!(!engine.retreat());
        assert!(engine.end().is_none());
        assert_eq!(engine.accuracy(), 0.0);
        assert_eq!(engine.progress().state, SessionState::Loading);
    }

    #[test]
    fn fixed_seeding_replays_the_same_batch() {
        let mut a = engine();
        let mut b = engine();
        let first: Vec<String> = a
            .start(Topic::DeMorgan)
            .questions()
            .iter()
            .map(|q| q.prompt().to_owned())
            .collect();
        let second: Vec<String> = b
            .start(Topic::DeMorgan)
            .questions()
            .iter()
            .map(|q| q.prompt().to_owned())
            .collect();
        assert_eq!(first.len(), DEFAULT_BATCH_SIZE);
        assert_eq!(first, second);
    }

    #[test]
    fn moving_clears_reveal_flags() {
        let mut engine = engine();
        engine.start(Topic::Complement);
        engine.show_hint();
        engine.show_solution();
        assert!(engine.session().unwrap().solution_shown());

        assert_eq!(engine.advance(), AdvanceOutcome::Moved);
        let session = engine.session().unwrap();
        assert!(!session.solution_shown());
        assert!(!session.hint_shown());
    }

    #[test]
    fn end_is_idempotent() {
        let mut engine = engine().with_batch_size(2);
        engine.start(Topic::BcdEncoding);
        let first = engine.end().unwrap();
        let second = engine.end().unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.state(), SessionState::Ended);
        assert_eq!(engine.advance(), AdvanceOutcome::Ignored);
    }
}
