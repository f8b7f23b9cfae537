use thiserror::Error;

use crate::generator::GenerationError;
use crate::model::{
    AppSettingsError, KMapError, ParseFormatError, ParseTopicError, ProgressError, QuestionError,
};

/// Any error raised by the core crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
    #[error(transparent)]
    KMap(#[from] KMapError),
    #[error(transparent)]
    Topic(#[from] ParseTopicError),
    #[error(transparent)]
    Format(#[from] ParseFormatError),
}
