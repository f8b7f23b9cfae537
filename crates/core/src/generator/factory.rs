use std::collections::HashMap;

use tracing::{debug, warn};

use crate::generator::{GenerationError, QuestionGenerator, generator_for};
use crate::model::{Question, QuestionFormat, QuestionId, Topic};
use crate::rng::{PseudoRandomStream, entropy_seed};
use crate::time::Clock;

/// Retries after the first attempt before a topic gives up on degenerate draws.
pub const MAX_RETRIES: u64 = 20;

/// Upper bound (exclusive) of the random perturbation added to batch seeds.
pub const BATCH_SEED_JITTER: u64 = 1_000;

/// Gap between consecutive replay seeds. One LCG step maps it to about 0.618
/// of the modulus, so the first draws of a replayed batch spread evenly, and
/// it exceeds `MAX_RETRIES` so retries never land on a sibling's seed.
pub const REPLAY_SEED_STRIDE: u64 = 10_675;

/// Seed of question `index` in a session replayed from `base`.
#[must_use]
pub fn replay_seed(base: u64, index: u64) -> u64 {
    base.wrapping_add(index.wrapping_mul(REPLAY_SEED_STRIDE))
}

/// Topic → generator dispatch table with seeding and bounded retries.
pub struct QuestionFactory {
    generators: HashMap<Topic, Box<dyn QuestionGenerator>>,
    clock: Clock,
}

impl Default for QuestionFactory {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuestionFactory {
    /// Factory with the built-in generator registered for every topic.
    #[must_use]
    pub fn standard() -> Self {
        let mut factory = Self::empty();
        for topic in Topic::ALL {
            factory.register(topic, generator_for(topic));
        }
        factory
    }

    /// Factory with no generators; every topic reports no generator.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            generators: HashMap::new(),
            clock: Clock::default(),
        }
    }

    /// Replaces the clock used for question ids and batch seeds.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Registers (or replaces) the generator for a topic.
    pub fn register(&mut self, topic: Topic, generator: Box<dyn QuestionGenerator>) {
        self.generators.insert(topic, generator);
    }

    /// Drops the generator for a topic.
    #[must_use]
    pub fn without(mut self, topic: Topic) -> Self {
        self.generators.remove(&topic);
        self
    }

    #[must_use]
    pub fn has_generator(&self, topic: Topic) -> bool {
        self.generators.contains_key(&topic)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Generates one question for `topic`.
    ///
    /// `Ok(None)` means no generator is registered for the topic. Without a
    /// seed an entropy seed is drawn. A degenerate draw is retried with the
    /// next seed, up to `MAX_RETRIES` times.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::RetryExhausted` when every attempt was degenerate.
    pub fn generate_question(
        &self,
        topic: Topic,
        format: QuestionFormat,
        seed: Option<u64>,
    ) -> Result<Option<Question>, GenerationError> {
        let Some(generator) = self.generators.get(&topic) else {
            debug!(%topic, "no generator registered");
            return Ok(None);
        };
        let seed = seed.unwrap_or_else(entropy_seed);

        for attempt in 0..=MAX_RETRIES {
            let mut rng = PseudoRandomStream::new(seed.wrapping_add(attempt));
            let Ok(draft) = generator.generate(format, &mut rng) else {
                debug!(%topic, seed, attempt, "degenerate draw, retrying");
                continue;
            };
            let id = QuestionId::issue(draft.id_prefix, self.clock.now_millis());
            match Question::new(
                id,
                topic,
                draft.format,
                draft.prompt,
                draft.options,
                draft.correct_answer,
                draft.hint,
                draft.solution,
            ) {
                Ok(question) => return Ok(Some(question)),
                Err(err) => {
                    warn!(%topic, seed, attempt, error = %err, "generated an invalid question, retrying");
                }
            }
        }

        Err(GenerationError::RetryExhausted {
            topic,
            attempts: u32::try_from(MAX_RETRIES + 1).unwrap_or(u32::MAX),
        })
    }

    /// Generates up to `count` questions with time-derived seeds.
    ///
    /// Entry `i` is seeded with the clock's milliseconds plus `i` plus a
    /// random perturbation below `BATCH_SEED_JITTER`. Topics without a
    /// generator yield an empty batch.
    #[must_use]
    pub fn generate_questions(
        &self,
        topic: Topic,
        format: QuestionFormat,
        count: usize,
    ) -> Vec<Question> {
        let base = self.clock.now_millis();
        let seeds = (0..count as u64)
            .map(|i| base.wrapping_add(i) + rand::random_range(0..BATCH_SEED_JITTER));
        self.generate_questions_from(topic, format, seeds)
    }

    /// Generates one question per supplied seed, in order.
    ///
    /// Seeds whose retries are exhausted are skipped with a warning.
    pub fn generate_questions_from(
        &self,
        topic: Topic,
        format: QuestionFormat,
        seeds: impl IntoIterator<Item = u64>,
    ) -> Vec<Question> {
        let mut questions = Vec::new();
        for seed in seeds {
            match self.generate_question(topic, format, Some(seed)) {
                Ok(Some(question)) => questions.push(question),
                Ok(None) => {}
                Err(err) => warn!(%topic, seed, error = %err, "skipping question"),
            }
        }
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Degenerate, QuestionDraft};
    use crate::model::CorrectAnswer;
    use crate::time::fixed_clock;

    struct AlwaysDegenerate;

    impl QuestionGenerator for AlwaysDegenerate {
        fn generate(
            &self,
            _format: QuestionFormat,
            _rng: &mut PseudoRandomStream,
        ) -> Result<QuestionDraft, Degenerate> {
            Err(Degenerate)
        }
    }

    fn factory() -> QuestionFactory {
        QuestionFactory::standard().with_clock(fixed_clock())
    }

    #[test]
    fn same_seed_same_content() {
        let factory = factory();
        for topic in Topic::ALL {
            for format in [QuestionFormat::MultipleChoice, QuestionFormat::FillIn] {
                let a = factory.generate_question(topic, format, Some(42)).unwrap().unwrap();
                let b = factory.generate_question(topic, format, Some(42)).unwrap().unwrap();
                assert!(a.same_content(&b), "{topic} {format}");
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn every_topic_yields_valid_questions_across_seeds() {
        let factory = factory();
        for topic in Topic::ALL {
            for seed in 0..250 {
                let question = factory
                    .generate_question(topic, QuestionFormat::MultipleChoice, Some(seed))
                    .unwrap()
                    .unwrap();
                assert_eq!(question.topic(), topic);
                if let Some(options) = question.options() {
                    assert!(options.len() >= 2);
                    let answer = question.correct_answer().as_single().unwrap();
                    assert!(options.iter().any(|o| o == answer));
                }
            }
        }
    }

    #[test]
    fn seed_42_number_conversion_is_reproducible() {
        let factory = factory();
        let first = factory
            .generate_question(Topic::NumberConversion, QuestionFormat::FillIn, Some(42))
            .unwrap()
            .unwrap();
        let again = factory
            .generate_question(Topic::NumberConversion, QuestionFormat::FillIn, Some(42))
            .unwrap()
            .unwrap();
        assert_eq!(first.prompt(), again.prompt());
        assert_eq!(first.correct_answer(), again.correct_answer());
        assert!(first.id().as_str().starts_with("num-oct-dec-"));
    }

    #[test]
    fn zero_is_a_real_seed() {
        let factory = factory();
        let question = factory
            .generate_question(Topic::BooleanBasic, QuestionFormat::MultipleChoice, Some(0))
            .unwrap()
            .unwrap();
        assert_eq!(question.correct_answer(), &CorrectAnswer::single("A"));
        assert!(question.id().as_str().starts_with("bool-and-id-"));
    }

    #[test]
    fn missing_generator_is_not_an_error() {
        let factory = factory().without(Topic::Complement);
        assert!(!factory.has_generator(Topic::Complement));
        let result = factory
            .generate_question(Topic::Complement, QuestionFormat::MultipleChoice, Some(1))
            .unwrap();
        assert!(result.is_none());
        assert!(
            factory
                .generate_questions(Topic::Complement, QuestionFormat::MultipleChoice, 5)
                .is_empty()
        );
    }

    #[test]
    fn retries_are_bounded() {
        let mut factory = QuestionFactory::empty();
        factory.register(Topic::DeMorgan, Box::new(AlwaysDegenerate));
        let err = factory
            .generate_question(Topic::DeMorgan, QuestionFormat::FillIn, Some(3))
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::RetryExhausted {
                topic: Topic::DeMorgan,
                attempts: 21
            }
        );
        assert!(
            factory
                .generate_questions_from(Topic::DeMorgan, QuestionFormat::FillIn, [1, 2])
                .is_empty()
        );
    }

    #[test]
    fn batch_has_requested_size() {
        let questions =
            factory().generate_questions(Topic::BooleanBasic, QuestionFormat::MultipleChoice, 5);
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.topic() == Topic::BooleanBasic));
    }

    #[test]
    fn kmap_is_fill_in_even_when_choices_are_requested() {
        let question = factory()
            .generate_question(Topic::KMap, QuestionFormat::MultipleChoice, None)
            .unwrap()
            .unwrap();
        assert_eq!(question.format(), QuestionFormat::FillIn);
        assert!(question.options().is_none());
    }

    #[test]
    fn replay_seeds_keep_retry_windows_apart() {
        assert_eq!(replay_seed(42, 0), 42);
        assert_eq!(replay_seed(42, 2), 42 + 2 * REPLAY_SEED_STRIDE);
        assert!(REPLAY_SEED_STRIDE > MAX_RETRIES);
        assert_eq!(replay_seed(u64::MAX, 1), REPLAY_SEED_STRIDE - 1);
    }
}
