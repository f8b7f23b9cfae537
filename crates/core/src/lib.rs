#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod rng;
pub mod time;

pub use error::Error;
pub use generator::{GenerationError, QuestionFactory};
pub use rng::PseudoRandomStream;
pub use time::Clock;
