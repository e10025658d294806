//! Fallback dictionary for items the catalog does not know.
//!
//! Entries use the shape of a dictionary search API response:
//!
//! ```json
//! { "data": [ { "slug": "解析",
//!               "japanese": [ { "reading": "かいせき" } ],
//!               "senses": [ { "english_definitions": ["analysis"],
//!                             "parts_of_speech": ["Noun"] } ] } ] }
//! ```
//!
//! Only the first datum is used: cards have no context to pick a sense by.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A source of fallback entries.
pub trait Dictionary {
    /// The most common entry for `query`, or `None` on a miss.
    fn search(&self, query: &str) -> Option<DictionaryEntry>;
}

impl<D: Dictionary + ?Sized> Dictionary for Box<D> {
    fn search(&self, query: &str) -> Option<DictionaryEntry> {
        (**self).search(query)
    }
}

/// One search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<DictionaryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Headword in its written form.
    pub slug: String,
    #[serde(default)]
    pub japanese: Vec<JapaneseForm>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapaneseForm {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub reading: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub english_definitions: Vec<String>,
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
}

impl DictionaryEntry {
    /// Readings of every written form; forms without a reading give `""`.
    #[must_use]
    pub fn readings(&self) -> Vec<String> {
        self.japanese
            .iter()
            .map(|form| form.reading.clone().unwrap_or_default())
            .collect()
    }

    /// One string per sense, its definitions comma-joined.
    #[must_use]
    pub fn senses(&self) -> Vec<String> {
        self.senses
            .iter()
            .map(|sense| sense.english_definitions.join(", "))
            .collect()
    }

    /// One string per sense, its parts of speech comma-joined.
    #[must_use]
    pub fn parts_of_speech(&self) -> Vec<String> {
        self.senses
            .iter()
            .map(|sense| sense.parts_of_speech.join(", "))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// JsonDictionary
// ---------------------------------------------------------------------------

/// Dictionary loaded from a JSON object mapping queries to search responses.
#[derive(Debug, Clone, Default)]
pub struct JsonDictionary {
    responses: HashMap<String, SearchResponse>,
}

impl JsonDictionary {
    /// Load a `{ query: response }` file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if it is not a map of search responses.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let responses = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { responses })
    }

    #[must_use]
    pub const fn from_responses(responses: HashMap<String, SearchResponse>) -> Self {
        Self { responses }
    }

    pub fn insert(&mut self, query: impl Into<String>, response: SearchResponse) {
        self.responses.insert(query.into(), response);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl Dictionary for JsonDictionary {
    fn search(&self, query: &str) -> Option<DictionaryEntry> {
        self.responses.get(query)?.data.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RESPONSES: &str = r#"{
        "解析": { "data": [
            { "slug": "解析",
              "japanese": [ { "word": "解析", "reading": "かいせき" } ],
              "senses": [
                { "english_definitions": ["analysis", "parsing"], "parts_of_speech": ["Noun", "Suru verb"] },
                { "english_definitions": ["calculus"], "parts_of_speech": ["Noun"] }
              ] },
            { "slug": "下伸", "senses": [] }
        ] },
        "無": { "data": [] }
    }"#;

    #[test]
    fn first_datum_wins() {
        let responses = serde_json::from_str(RESPONSES).unwrap();
        let dictionary = JsonDictionary::from_responses(responses);

        let entry = dictionary.search("解析").unwrap();
        assert_eq!(entry.slug, "解析");
        assert_eq!(entry.readings(), vec!["かいせき"]);
        assert_eq!(entry.senses(), vec!["analysis, parsing", "calculus"]);
        assert_eq!(entry.parts_of_speech(), vec!["Noun, Suru verb", "Noun"]);
    }

    #[test]
    fn empty_data_and_unknown_queries_miss() {
        let dictionary = JsonDictionary::from_responses(serde_json::from_str(RESPONSES).unwrap());
        assert!(dictionary.search("無").is_none());
        assert!(dictionary.search("猫").is_none());
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(RESPONSES.as_bytes()).unwrap();

        let dictionary = JsonDictionary::from_path(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();

        let err = JsonDictionary::from_path(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
