use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::kmap::KMapGrid;
use crate::model::topic::Topic;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("multiple-choice question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("duplicate option: {option}")]
    DuplicateOption { option: String },

    #[error("correct answer {answer} is not among the options")]
    AnswerNotInOptions { answer: String },

    #[error("multiple-choice questions need a single correct answer")]
    SetAnswerWithOptions,

    #[error("fill-in questions carry no options")]
    UnexpectedOptions,

    #[error("prompt cannot be empty")]
    EmptyPrompt,
}

//
// ─── FORMAT ────────────────────────────────────────────────────────────────────
//

/// How a question is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionFormat {
    #[default]
    MultipleChoice,
    FillIn,
}

impl QuestionFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionFormat::MultipleChoice => "multiple-choice",
            QuestionFormat::FillIn => "fill-in",
        }
    }
}

impl fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question format: {0}")]
pub struct ParseFormatError(String);

impl FromStr for QuestionFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple-choice" | "mc" => Ok(QuestionFormat::MultipleChoice),
            "fill-in" | "fill" => Ok(QuestionFormat::FillIn),
            other => Err(ParseFormatError(other.to_owned())),
        }
    }
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// The expected answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    /// Multi-part answer; part order does not matter.
    Set(Vec<String>),
}

impl CorrectAnswer {
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            CorrectAnswer::Single(value) => Some(value),
            CorrectAnswer::Set(_) => None,
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, CorrectAnswer::Set(_))
    }

    /// Whether a submitted answer is correct.
    ///
    /// Scalars compare as exact strings; sets compare as multisets. A grid
    /// answer never matches: the k-map topic only has a placeholder answer.
    #[must_use]
    pub fn matches(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (CorrectAnswer::Single(expected), Answer::Text(given)) => expected == given,
            (CorrectAnswer::Set(expected), Answer::Set(given)) => {
                sorted(expected) == sorted(given)
            }
            _ => false,
        }
    }
}

impl fmt::Display for CorrectAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectAnswer::Single(value) => f.write_str(value),
            CorrectAnswer::Set(values) => f.write_str(&values.join(", ")),
        }
    }
}

fn sorted(values: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = values.iter().map(String::as_str).collect();
    out.sort_unstable();
    out
}

/// A submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Text(String),
    Set(Vec<String>),
    /// Cell selection from the interactive Karnaugh map widget.
    Grid(KMapGrid),
}

impl Answer {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Splits a comma separated entry into a set answer, trimming each part.
    #[must_use]
    pub fn parse_set(raw: &str) -> Self {
        Self::Set(
            raw.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A generated practice question. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    format: QuestionFormat,
    prompt: String,
    options: Option<Vec<String>>,
    correct_answer: CorrectAnswer,
    hint: String,
    solution: String,
    topic: Topic,
}

impl Question {
    /// Builds a question, checking the option invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if options are present for a fill-in question,
    /// fewer than two or duplicated for a multiple-choice one, or do not
    /// contain the correct answer.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        topic: Topic,
        format: QuestionFormat,
        prompt: impl Into<String>,
        options: Option<Vec<String>>,
        correct_answer: CorrectAnswer,
        hint: impl Into<String>,
        solution: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        validate_options(format, options.as_deref(), &correct_answer)?;

        Ok(Self {
            id,
            format,
            prompt,
            options,
            correct_answer,
            hint: hint.into(),
            solution: solution.into(),
            topic,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn format(&self) -> QuestionFormat {
        self.format
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    #[must_use]
    pub fn correct_answer(&self) -> &CorrectAnswer {
        &self.correct_answer
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn solution(&self) -> &str {
        &self.solution
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn is_correct(&self, answer: &Answer) -> bool {
        self.correct_answer.matches(answer)
    }

    /// Same question content, ignoring the issued id.
    #[must_use]
    pub fn same_content(&self, other: &Question) -> bool {
        self.format == other.format
            && self.prompt == other.prompt
            && self.options == other.options
            && self.correct_answer == other.correct_answer
            && self.topic == other.topic
    }
}

fn validate_options(
    format: QuestionFormat,
    options: Option<&[String]>,
    correct: &CorrectAnswer,
) -> Result<(), QuestionError> {
    let options = match (format, options) {
        (QuestionFormat::FillIn, None) => return Ok(()),
        (QuestionFormat::FillIn, Some(_)) => return Err(QuestionError::UnexpectedOptions),
        (QuestionFormat::MultipleChoice, None) => {
            return Err(QuestionError::TooFewOptions { len: 0 });
        }
        (QuestionFormat::MultipleChoice, Some(options)) => options,
    };

    if options.len() < 2 {
        return Err(QuestionError::TooFewOptions { len: options.len() });
    }
    let mut seen = HashSet::with_capacity(options.len());
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(QuestionError::DuplicateOption {
                option: option.clone(),
            });
        }
    }
    let Some(answer) = correct.as_single() else {
        return Err(QuestionError::SetAnswerWithOptions);
    };
    if !seen.contains(answer) {
        return Err(QuestionError::AnswerNotInOptions {
            answer: answer.to_owned(),
        });
    }
    Ok(())
}
