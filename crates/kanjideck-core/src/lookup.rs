//! The lookup capability the graph consumes.
//!
//! A [`LookupProvider`] resolves `(value, kind)` to a [`Subject`]: either a
//! catalogued item with declared components, or a fallback dictionary hit
//! whose components were re-derived character by character. The graph only
//! reads components; the descriptive fields are passed through to card
//! rendering.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::ItemKind;

/// External numeric identifier of a subject.
pub type SubjectId = u64;

/// Resolves items to subjects.
///
/// A `None` result means "not found"; the graph treats it as a leaf, never
/// as an error.
pub trait LookupProvider {
    /// Look up `value` as an item of `kind`. `value` may be a decimal subject
    /// id for items without printable characters.
    fn lookup(&self, value: &str, kind: ItemKind) -> Option<Subject>;
}

impl<P: LookupProvider + ?Sized> LookupProvider for &P {
    fn lookup(&self, value: &str, kind: ItemKind) -> Option<Subject> {
        (**self).lookup(value, kind)
    }
}

/// A reference from a subject to one of its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub id: SubjectId,
    /// Printable characters, absent for image-only radicals.
    pub characters: Option<String>,
    pub kind: ItemKind,
}

impl ComponentRef {
    /// The value the component's graph node is keyed by: its characters, or
    /// its decimal id when it has none.
    #[must_use]
    pub fn node_value(&self) -> String {
        match self.characters.as_deref() {
            Some(chars) if !chars.is_empty() => chars.to_string(),
            _ => self.id.to_string(),
        }
    }
}

/// Where a subject's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectSource {
    Catalog,
    Dictionary,
}

impl fmt::Display for SubjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Catalog => "catalog",
            Self::Dictionary => "dictionary",
        })
    }
}

/// A subject backed by a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogSubject {
    pub id: SubjectId,
    pub kind: Option<ItemKind>,
    pub characters: Option<String>,
    /// Declared components, in catalog order.
    pub components: Vec<ComponentRef>,
    pub readings: Vec<String>,
    pub meanings: Vec<String>,
    pub reading_mnemonic: String,
    pub meaning_mnemonic: String,
    pub parts_of_speech: Vec<String>,
    /// File name of the rendering image for items without characters.
    pub image: Option<String>,
}

/// A subject backed by a fallback dictionary search.
///
/// `components` hold the catalogued kanji re-derived from the entry's
/// characters; for anything but vocabulary they are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSubject {
    pub id: SubjectId,
    pub kind: ItemKind,
    pub characters: String,
    pub components: Vec<ComponentRef>,
    pub readings: Vec<String>,
    /// One entry per sense, definitions already comma-joined.
    pub senses: Vec<String>,
    pub parts_of_speech: Vec<String>,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Catalogued(CatalogSubject),
    Fallback(FallbackSubject),
}

impl Subject {
    #[must_use]
    pub const fn is_catalogued(&self) -> bool {
        matches!(self, Self::Catalogued(_))
    }

    #[must_use]
    pub const fn source(&self) -> SubjectSource {
        match self {
            Self::Catalogued(_) => SubjectSource::Catalog,
            Self::Fallback(_) => SubjectSource::Dictionary,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SubjectId {
        match self {
            Self::Catalogued(s) => s.id,
            Self::Fallback(s) => s.id,
        }
    }

    /// The subject's own kind, when known.
    #[must_use]
    pub const fn kind(&self) -> Option<ItemKind> {
        match self {
            Self::Catalogued(s) => s.kind,
            Self::Fallback(s) => Some(s.kind),
        }
    }

    /// Printable characters; empty for image-only radicals.
    #[must_use]
    pub fn characters(&self) -> &str {
        match self {
            Self::Catalogued(s) => s.characters.as_deref().unwrap_or_default(),
            Self::Fallback(s) => &s.characters,
        }
    }

    #[must_use]
    pub fn components(&self) -> &[ComponentRef] {
        match self {
            Self::Catalogued(s) => &s.components,
            Self::Fallback(s) => &s.components,
        }
    }

    #[must_use]
    pub fn reading(&self) -> String {
        match self {
            Self::Catalogued(s) => s.readings.join(", "),
            Self::Fallback(s) => s.readings.join(", "),
        }
    }

    #[must_use]
    pub fn meaning(&self) -> String {
        match self {
            Self::Catalogued(s) => s.meanings.join(", "),
            Self::Fallback(s) => s.senses.join(", "),
        }
    }

    #[must_use]
    pub fn reading_mnemonic(&self) -> &str {
        match self {
            Self::Catalogued(s) => &s.reading_mnemonic,
            Self::Fallback(_) => "",
        }
    }

    #[must_use]
    pub fn meaning_mnemonic(&self) -> &str {
        match self {
            Self::Catalogued(s) => &s.meaning_mnemonic,
            Self::Fallback(_) => "",
        }
    }

    #[must_use]
    pub fn parts_of_speech(&self) -> String {
        match self {
            Self::Catalogued(s) => s.parts_of_speech.join(", "),
            Self::Fallback(s) => s.parts_of_speech.join(", "),
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Catalogued(s) => s.image.as_deref(),
            Self::Fallback(_) => None,
        }
    }
}

/// Provider backed by a fixed map, keyed exactly by `(value, kind)`.
///
/// Handy for embedding small hand-written catalogs and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    subjects: HashMap<(String, ItemKind), Subject>,
}

impl StaticProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: impl Into<String>, kind: ItemKind, subject: Subject) {
        self.subjects.insert((value.into(), kind), subject);
    }

    /// Register a catalogued subject whose components are `(value, kind)`
    /// pairs. Components get synthetic ids derived from their position.
    pub fn with_components(
        mut self,
        value: &str,
        kind: ItemKind,
        components: &[(&str, ItemKind)],
    ) -> Self {
        let subject = CatalogSubject {
            id: self.subjects.len() as SubjectId + 1,
            kind: Some(kind),
            characters: Some(value.to_string()),
            components: components
                .iter()
                .enumerate()
                .map(|(i, (chars, kind))| ComponentRef {
                    id: i as SubjectId,
                    characters: Some((*chars).to_string()),
                    kind: *kind,
                })
                .collect(),
            ..CatalogSubject::default()
        };
        self.insert(value, kind, Subject::Catalogued(subject));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl LookupProvider for StaticProvider {
    fn lookup(&self, value: &str, kind: ItemKind) -> Option<Subject> {
        self.subjects.get(&(value.to_string(), kind)).cloned()
    }
}
