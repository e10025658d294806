//! kanjideck-catalog library.
//!
//! Implements [`LookupProvider`](kanjideck_core::LookupProvider) over a JSON
//! subject catalog, with an optional fallback [`Dictionary`] for words the
//! catalog does not cover.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod dictionary;
pub mod error;

pub use catalog::{Catalog, CatalogIndex, FALLBACK_SUBJECT_ID};
pub use dictionary::{Dictionary, DictionaryEntry, JsonDictionary, SearchResponse};
pub use error::CatalogError;
