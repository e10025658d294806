use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three tiers of the composition hierarchy.
///
/// Serialized under the names the subject catalog uses for its `object`
/// field (`radical`, `kanji`, `vocabulary`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// Non-decomposable sub-character building block.
    #[serde(rename = "radical")]
    Primitive,
    /// A single ideographic character.
    #[serde(rename = "kanji")]
    Character,
    /// A vocabulary item made of characters or other words.
    #[serde(rename = "vocabulary")]
    CompoundWord,
}

impl ItemKind {
    /// All kinds, bottom tier first.
    pub const ALL: [Self; 3] = [Self::Primitive, Self::Character, Self::CompoundWord];

    /// Catalog name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primitive => "radical",
            Self::Character => "kanji",
            Self::CompoundWord => "vocabulary",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

pub(crate) fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for ItemKind {
    type Err = ParseEnumError;

    /// Accepts the catalog names as well as the tier names
    /// (`primitive`, `character`, `word`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "radical" | "primitive" => Ok(Self::Primitive),
            "kanji" | "character" => Ok(Self::Character),
            "vocabulary" | "word" | "compound" => Ok(Self::CompoundWord),
            _ => Err(ParseEnumError {
                expected: "item kind",
                got: s.to_string(),
            }),
        }
    }
}
