use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a generated question.
///
/// Shape: `<prefix>-<issued millis>-<disambiguator>`. The disambiguator is a
/// fresh random value, so two questions issued in the same millisecond with
/// the same prefix still get distinct ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Issues a new id for a question with the given shape prefix.
    #[must_use]
    pub fn issue(prefix: &str, issued_millis: u64) -> Self {
        let disambiguator = Uuid::new_v4().simple().to_string();
        Self(format!("{prefix}-{issued_millis}-{}", &disambiguator[..12]))
    }

    /// Wraps an id that was issued earlier (e.g. loaded from an export).
    #[must_use]
    pub fn from_persisted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_ids_carry_prefix_and_time() {
        let id = QuestionId::issue("bool-abs", 1_700_000_000_000);
        assert!(id.as_str().starts_with("bool-abs-1700000000000-"));
    }

    #[test]
    fn ids_issued_in_same_millisecond_differ() {
        let a = QuestionId::issue("bcd", 42);
        let b = QuestionId::issue("bcd", 42);
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_raw_string() {
        let id = QuestionId::from_persisted("gate-1");
        assert_eq!(id.to_string(), "gate-1");
        assert_eq!(format!("{id:?}"), "QuestionId(gate-1)");
    }
}
