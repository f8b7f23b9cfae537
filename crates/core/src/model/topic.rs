use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── TOPICS ────────────────────────────────────────────────────────────────────
//

/// A practice topic. Each topic has exactly one generator and one progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    BooleanBasic,
    #[serde(rename = "demorgan")]
    DeMorgan,
    GateConversion,
    BooleanSimplify,
    SopPos,
    AlgebraAlgorithm,
    KMap,
    CombinationalSimplify,
    NumberRepresentation,
    NumberConversion,
    Complement,
    BcdEncoding,
}

impl Topic {
    /// Every topic, in catalog order.
    pub const ALL: [Topic; 12] = [
        Topic::BooleanBasic,
        Topic::DeMorgan,
        Topic::GateConversion,
        Topic::BooleanSimplify,
        Topic::SopPos,
        Topic::AlgebraAlgorithm,
        Topic::KMap,
        Topic::CombinationalSimplify,
        Topic::NumberRepresentation,
        Topic::NumberConversion,
        Topic::Complement,
        Topic::BcdEncoding,
    ];

    /// Stable string id, used as the persistence key suffix.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Topic::BooleanBasic => "boolean-basic",
            Topic::DeMorgan => "demorgan",
            Topic::GateConversion => "gate-conversion",
            Topic::BooleanSimplify => "boolean-simplify",
            Topic::SopPos => "sop-pos",
            Topic::AlgebraAlgorithm => "algebra-algorithm",
            Topic::KMap => "k-map",
            Topic::CombinationalSimplify => "combinational-simplify",
            Topic::NumberRepresentation => "number-representation",
            Topic::NumberConversion => "number-conversion",
            Topic::Complement => "complement",
            Topic::BcdEncoding => "bcd-encoding",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Topic::BooleanBasic => "Boolean algebra basics",
            Topic::DeMorgan => "De Morgan's theorem",
            Topic::GateConversion => "Logic gate conversion",
            Topic::BooleanSimplify => "Boolean simplification",
            Topic::SopPos => "Canonical forms (SOP, POS)",
            Topic::AlgebraAlgorithm => "Algebraic simplification",
            Topic::KMap => "Karnaugh map (interactive)",
            Topic::CombinationalSimplify => "Combinational circuit simplification",
            Topic::NumberRepresentation => "Decimal, binary, octal and hex notation",
            Topic::NumberConversion => "Converting between number bases",
            Topic::Complement => "Complements (1's, 2's, 9's, 10's)",
            Topic::BcdEncoding => "BCD, ASCII and Gray code",
        }
    }

    #[must_use]
    pub fn group(self) -> ChapterGroup {
        match self {
            Topic::NumberRepresentation
            | Topic::NumberConversion
            | Topic::Complement
            | Topic::BcdEncoding => ChapterGroup::NumberSystem,
            _ => ChapterGroup::BooleanAlgebra,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown topic id: {raw}")]
pub struct ParseTopicError {
    raw: String,
}

impl FromStr for Topic {
    type Err = ParseTopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.id() == s)
            .ok_or_else(|| ParseTopicError { raw: s.to_owned() })
    }
}

//
// ─── CHAPTER CATALOG ───────────────────────────────────────────────────────────
//

/// Top-level chapter grouping shown in navigation. Groups carry no generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterGroup {
    BooleanAlgebra,
    NumberSystem,
}

impl ChapterGroup {
    pub const ALL: [ChapterGroup; 2] = [ChapterGroup::BooleanAlgebra, ChapterGroup::NumberSystem];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ChapterGroup::BooleanAlgebra => "boolean-algebra",
            ChapterGroup::NumberSystem => "number-system",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChapterGroup::BooleanAlgebra => "Boolean algebra and De Morgan's theorem",
            ChapterGroup::NumberSystem => "Number systems",
        }
    }

    /// Topics under this group, in catalog order.
    pub fn topics(self) -> impl Iterator<Item = Topic> {
        Topic::ALL.into_iter().filter(move |topic| topic.group() == self)
    }
}

/// A resolved navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterEntry {
    Group(ChapterGroup),
    Topic(Topic),
}

impl ChapterEntry {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChapterEntry::Group(group) => group.title(),
            ChapterEntry::Topic(topic) => topic.title(),
        }
    }

    /// The practicable topic, if this entry is one.
    #[must_use]
    pub fn topic(self) -> Option<Topic> {
        match self {
            ChapterEntry::Topic(topic) => Some(topic),
            ChapterEntry::Group(_) => None,
        }
    }
}

/// Looks up a group or topic by its string id.
#[must_use]
pub fn find_chapter(id: &str) -> Option<ChapterEntry> {
    ChapterGroup::ALL
        .into_iter()
        .find(|group| group.id() == id)
        .map(ChapterEntry::Group)
        .or_else(|| id.parse::<Topic>().ok().map(ChapterEntry::Topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for topic in Topic::ALL {
            assert_eq!(topic.id().parse::<Topic>().unwrap(), topic);
        }
    }

    #[test]
    fn serde_uses_catalog_ids() {
        for topic in Topic::ALL {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.id()));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "karnaugh".parse::<Topic>().unwrap_err();
        assert_eq!(err.to_string(), "unknown topic id: karnaugh");
    }

    #[test]
    fn groups_partition_the_catalog() {
        let boolean: Vec<_> = ChapterGroup::BooleanAlgebra.topics().collect();
        let numbers: Vec<_> = ChapterGroup::NumberSystem.topics().collect();
        assert_eq!(boolean.len(), 8);
        assert_eq!(numbers.len(), 4);
        assert_eq!(numbers[0], Topic::NumberRepresentation);
    }

    #[test]
    fn find_chapter_resolves_groups_and_topics() {
        assert_eq!(
            find_chapter("number-system"),
            Some(ChapterEntry::Group(ChapterGroup::NumberSystem))
        );
        assert_eq!(find_chapter("k-map").and_then(ChapterEntry::topic), Some(Topic::KMap));
        assert!(find_chapter("boolean-algebra").unwrap().topic().is_none());
        assert!(find_chapter("missing").is_none());
    }
}
