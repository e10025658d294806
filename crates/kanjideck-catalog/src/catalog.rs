//! The subject catalog: a JSON index of radicals, kanji and vocabulary.
//!
//! # Format
//!
//! ```json
//! {
//!   "character_lookup": { "vocabulary": { "人形": 3420 }, "kanji": { "人": 444 }, "radical": {} },
//!   "subjects": {
//!     "3420": { "id": 3420, "object": "vocabulary",
//!               "data": { "characters": "人形", "component_subject_ids": [444, 589],
//!                         "meanings": [ { "meaning": "Doll" } ],
//!                         "readings": [ { "reading": "にんぎょう" } ] } }
//!   }
//! }
//! ```
//!
//! Every `data` field but `characters` may be omitted. Radicals without a
//! printable form have `"characters": null` and are looked up by id.
//!
//! # Resolution
//!
//! 1. A value that parses as an unsigned integer is a subject id.
//! 2. Otherwise the id comes from `character_lookup[kind][value]`.
//! 3. A known id yields a catalogued subject.
//! 4. Anything else goes to the fallback dictionary, if one is attached.

use std::collections::HashMap;
use std::path::Path;

use kanjideck_core::{
    CatalogSubject, ComponentRef, FallbackSubject, ItemKind, LookupProvider, Subject, SubjectId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::error::CatalogError;

/// Id carried by every fallback subject. Outside the catalog's id space.
pub const FALLBACK_SUBJECT_ID: SubjectId = 1 << 31;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogIndex {
    #[serde(default)]
    pub character_lookup: HashMap<String, HashMap<String, LookupId>>,
    #[serde(default)]
    pub subjects: HashMap<String, SubjectRecord>,
}

/// Lookup tables written by older exporters store ids as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupId {
    Number(SubjectId),
    #[serde(with = "id_string")]
    Text(SubjectId),
}

impl LookupId {
    #[must_use]
    pub const fn get(self) -> SubjectId {
        match self {
            Self::Number(id) | Self::Text(id) => id,
        }
    }
}

mod id_string {
    use kanjideck_core::SubjectId;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(id: &SubjectId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SubjectId, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.trim().parse().map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    /// `radical`, `kanji` or `vocabulary`; other objects are kept but
    /// have no kind.
    pub object: String,
    #[serde(default)]
    pub data: SubjectData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectData {
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub component_subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub amalgamation_subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub meanings: Vec<MeaningRecord>,
    #[serde(default)]
    pub readings: Vec<ReadingRecord>,
    #[serde(default)]
    pub meaning_mnemonic: Option<String>,
    #[serde(default)]
    pub reading_mnemonic: Option<String>,
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
    #[serde(default)]
    pub character_images: Vec<CharacterImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeaningRecord {
    pub meaning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub reading: String,
}

/// A downloaded image file name, or a remote image not yet downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterImage {
    File(String),
    Remote { url: String },
}

impl CharacterImage {
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::File(name) => name,
            Self::Remote { url } => url,
        }
    }
}

impl SubjectRecord {
    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        self.object.parse().ok()
    }

    /// Printable characters, ignoring empty strings.
    #[must_use]
    pub fn characters(&self) -> Option<&str> {
        self.data.characters.as_deref().filter(|c| !c.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// In-memory catalog with an optional fallback dictionary.
pub struct Catalog {
    lookup: HashMap<ItemKind, HashMap<String, SubjectId>>,
    subjects: HashMap<SubjectId, SubjectRecord>,
    dictionary: Option<Box<dyn Dictionary>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("subjects", &self.subjects.len())
            .field("dictionary", &self.dictionary.is_some())
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Load a catalog index from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if it is not a catalog index.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index: CatalogIndex =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_index(index))
    }

    /// Build from a parsed index. Lookup tables for unknown object kinds are
    /// ignored.
    #[must_use]
    pub fn from_index(index: CatalogIndex) -> Self {
        let mut lookup: HashMap<ItemKind, HashMap<String, SubjectId>> = HashMap::new();
        for (kind, table) in index.character_lookup {
            let Ok(kind) = kind.parse::<ItemKind>() else {
                debug!(kind = %kind, "ignoring lookup table of unknown kind");
                continue;
            };
            lookup
                .entry(kind)
                .or_default()
                .extend(table.into_iter().map(|(chars, id)| (chars, id.get())));
        }

        let subjects = index
            .subjects
            .into_values()
            .map(|record| (record.id, record))
            .collect();

        Self {
            lookup,
            subjects,
            dictionary: None,
        }
    }

    /// Attach a fallback dictionary for items missing from the catalog.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: impl Dictionary + 'static) -> Self {
        self.dictionary = Some(Box::new(dictionary));
        self
    }

    #[must_use]
    pub const fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    /// Number of subject records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The subject id `value` names as an item of `kind`, if any.
    #[must_use]
    pub fn resolve_id(&self, value: &str, kind: ItemKind) -> Option<SubjectId> {
        if let Ok(id) = value.parse::<SubjectId>() {
            return Some(id);
        }
        self.lookup.get(&kind)?.get(value).copied()
    }

    /// `true` when `text` is a vocabulary spelling in the lookup table.
    /// Subject ids and the fallback dictionary are not consulted.
    #[must_use]
    pub fn is_vocabulary(&self, text: &str) -> bool {
        self.lookup
            .get(&ItemKind::CompoundWord)
            .is_some_and(|table| table.contains_key(text))
    }

    #[must_use]
    pub fn record(&self, id: SubjectId) -> Option<&SubjectRecord> {
        self.subjects.get(&id)
    }

    /// The catalogued subject with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingSubject`] if there is no such record.
    pub fn subject(&self, id: SubjectId) -> Result<Subject, CatalogError> {
        let record = self.record(id).ok_or(CatalogError::MissingSubject(id))?;
        Ok(Subject::Catalogued(self.catalogued(record)))
    }

    fn catalogued(&self, record: &SubjectRecord) -> CatalogSubject {
        let data = &record.data;
        CatalogSubject {
            id: record.id,
            kind: record.kind(),
            characters: record.characters().map(str::to_string),
            components: self.component_refs(record.id, &data.component_subject_ids),
            readings: data.readings.iter().map(|r| r.reading.clone()).collect(),
            meanings: data.meanings.iter().map(|m| m.meaning.clone()).collect(),
            reading_mnemonic: data.reading_mnemonic.clone().unwrap_or_default(),
            meaning_mnemonic: data.meaning_mnemonic.clone().unwrap_or_default(),
            parts_of_speech: data.parts_of_speech.clone(),
            image: data
                .character_images
                .first()
                .map(|image| image.location().to_string())
                .filter(|location| !location.is_empty()),
        }
    }

    /// Resolve component ids. Ids without a record, or whose record has no
    /// usable kind, are dropped.
    fn component_refs(&self, owner: SubjectId, ids: &[SubjectId]) -> Vec<ComponentRef> {
        ids.iter()
            .filter_map(|&id| {
                let Some(record) = self.record(id) else {
                    warn!(subject = owner, component = id, "component has no catalog record; dropping");
                    return None;
                };
                let Some(kind) = record.kind() else {
                    warn!(subject = owner, component = id, object = %record.object, "component has unknown kind; dropping");
                    return None;
                };
                Some(ComponentRef {
                    id,
                    characters: record.characters().map(str::to_string),
                    kind,
                })
            })
            .collect()
    }

    fn fallback(&self, value: &str, kind: ItemKind) -> Option<Subject> {
        let Some(dictionary) = self.dictionary.as_ref() else {
            debug!(value = %value, kind = %kind, "not in catalog and no dictionary attached");
            return None;
        };
        let Some(entry) = dictionary.search(value) else {
            warn!(value = %value, kind = %kind, "could not find data in catalog or dictionary");
            return None;
        };
        Some(Subject::Fallback(self.fallback_subject(&entry, kind)))
    }

    /// A fallback subject for `entry`.
    ///
    /// Only vocabulary gets components: each character of the headword that
    /// the catalog knows as a kanji. Dictionary radical data is not used.
    #[must_use]
    pub fn fallback_subject(&self, entry: &DictionaryEntry, kind: ItemKind) -> FallbackSubject {
        let components = if kind == ItemKind::CompoundWord {
            self.catalogued_kanji(&entry.slug)
        } else {
            Vec::new()
        };
        FallbackSubject {
            id: FALLBACK_SUBJECT_ID,
            kind,
            characters: entry.slug.clone(),
            components,
            readings: entry.readings(),
            senses: entry.senses(),
            parts_of_speech: entry.parts_of_speech(),
        }
    }

    fn catalogued_kanji(&self, text: &str) -> Vec<ComponentRef> {
        let Some(kanji) = self.lookup.get(&ItemKind::Character) else {
            return Vec::new();
        };
        text.chars()
            .filter_map(|c| {
                let chars = c.to_string();
                let id = *kanji.get(&chars)?;
                Some(ComponentRef {
                    id,
                    characters: Some(chars),
                    kind: ItemKind::Character,
                })
            })
            .collect()
    }
}

impl LookupProvider for Catalog {
    fn lookup(&self, value: &str, kind: ItemKind) -> Option<Subject> {
        if let Some(id) = self.resolve_id(value, kind) {
            match self.subject(id) {
                Ok(subject) => return Some(subject),
                Err(err) => warn!(value = %value, kind = %kind, "{err}"),
            }
        }
        self.fallback(value, kind)
    }
}
