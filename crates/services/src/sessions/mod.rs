mod engine;

// Public API of the session subsystem.
pub use engine::{AdvanceOutcome, DEFAULT_BATCH_SIZE, Seeding, SessionEngine};
