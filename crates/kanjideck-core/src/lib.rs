//! kanjideck-core library.
//!
//! Builds the composition graph of Japanese study items (radicals, kanji and
//! vocabulary) discovered in a text, and reads out study orders in which
//! every item follows its prerequisites.
//!
//! ```rust,ignore
//! use kanjideck_core::{DeckOrder, KanjiGraph};
//!
//! let mut graph = KanjiGraph::new(&catalog);
//! graph.add("人形");
//! let deck = graph.sequence(DeckOrder::Riffled);
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` at config seams; graph operations are
//!   infallible and report inapplicable input with `None`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod graph;
pub mod kind;
pub mod lookup;
pub mod node;
pub mod script;

pub use graph::{DeckOrder, DependencyTree, GraphStats, KanjiGraph};
pub use kind::{ItemKind, ParseEnumError};
pub use lookup::{
    CatalogSubject, ComponentRef, FallbackSubject, LookupProvider, StaticProvider, Subject,
    SubjectId, SubjectSource,
};
pub use node::{Node, NodeId, NodeKey};
