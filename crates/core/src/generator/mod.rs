//! Question generation: one generator per topic behind a single trait, and a
//! factory that dispatches to them with bounded degeneracy retries.
//!
//! | Module    | Purpose |
//! |-----------|---------|
//! | `factory` | `QuestionFactory`: dispatch table, seeding, retry loop, id issuing |
//! | `helpers` | option assembly, distractor filtering, radix rendering |
//! | `topics`  | the twelve topic generators |

mod factory;
mod helpers;
mod topics;

use thiserror::Error;

use crate::model::{CorrectAnswer, QuestionFormat, Topic};
use crate::rng::PseudoRandomStream;

pub use factory::{
    BATCH_SEED_JITTER, MAX_RETRIES, QuestionFactory, REPLAY_SEED_STRIDE, replay_seed,
};
pub use topics::KMAP_PLACEHOLDER_ANSWER;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generator for {topic} kept drawing degenerate operands ({attempts} attempts)")]
    RetryExhausted { topic: Topic, attempts: u32 },
}

/// A draw whose operands collide where they must differ. Retried by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degenerate;

//
// ─── GENERATOR CAPABILITY ──────────────────────────────────────────────────────
//

/// Question content before an id and topic are stamped on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    /// Shape tag used as the id prefix, e.g. `bool-abs`.
    pub id_prefix: &'static str,
    pub format: QuestionFormat,
    pub prompt: String,
    pub options: Option<Vec<String>>,
    pub correct_answer: CorrectAnswer,
    pub hint: String,
    pub solution: String,
}

/// Synthesizes one question from a seeded stream.
///
/// Implementations must be pure with respect to the stream: the same stream
/// state and format always yield the same draft.
pub trait QuestionGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `Degenerate` when the drawn operands cannot form a valid question.
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate>;
}

/// The built-in generator for a topic.
///
/// The match is exhaustive, so adding a topic without a generator fails to compile.
#[must_use]
pub fn generator_for(topic: Topic) -> Box<dyn QuestionGenerator> {
    use topics::*;
    match topic {
        Topic::BooleanBasic => Box::new(BooleanBasic),
        Topic::DeMorgan => Box::new(DeMorgan),
        Topic::GateConversion => Box::new(GateConversion),
        Topic::BooleanSimplify => Box::new(BooleanSimplify),
        Topic::SopPos => Box::new(SopPos),
        Topic::AlgebraAlgorithm => Box::new(AlgebraAlgorithm),
        Topic::KMap => Box::new(KMapPlaceholder),
        Topic::CombinationalSimplify => Box::new(CombinationalSimplify),
        Topic::NumberRepresentation => Box::new(NumberRepresentation),
        Topic::NumberConversion => Box::new(NumberConversion),
        Topic::Complement => Box::new(Complement),
        Topic::BcdEncoding => Box::new(BcdEncoding),
    }
}
