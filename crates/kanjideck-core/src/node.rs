//! Graph nodes and their identity.

use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::kind::ItemKind;

/// Handle to a node owned by a [`KanjiGraph`](crate::graph::KanjiGraph).
///
/// Handles are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) NodeIndex);

impl NodeId {
    /// Position of the node in insertion order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// Identity of a node: the printable value plus the tier.
///
/// `value` is the character sequence, or the decimal subject id for items
/// that have no printable form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub value: String,
    pub kind: ItemKind,
}

impl NodeKey {
    #[must_use]
    pub fn new(value: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.kind)
    }
}

/// A single unit of study content.
///
/// Edges are held by the graph arena, not by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: NodeKey,
    occurrences: u32,
    transitive_dependencies: u64,
}

impl Node {
    /// Create a node seen once.
    ///
    /// # Panics
    ///
    /// Panics if `value` is empty. Every node must be addressable by a
    /// non-empty value; an empty one is a caller bug.
    pub(crate) fn new(value: String, kind: ItemKind) -> Self {
        assert!(!value.is_empty(), "({value:?}, {kind}) is an invalid node");
        Self {
            key: NodeKey { value, kind },
            occurrences: 1,
            transitive_dependencies: 0,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.key.value
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.key.kind
    }

    #[must_use]
    pub const fn key(&self) -> &NodeKey {
        &self.key
    }

    /// How many times this identity has been inserted, directly or as a
    /// component of something else.
    #[must_use]
    pub const fn occurrences(&self) -> u32 {
        self.occurrences
    }

    /// Cached complexity. Refreshed by
    /// [`KanjiGraph::order_by_complexity`](crate::graph::KanjiGraph::order_by_complexity);
    /// stale after later insertions.
    #[must_use]
    pub const fn transitive_dependencies(&self) -> u64 {
        self.transitive_dependencies
    }

    pub(crate) const fn bump(&mut self) {
        self.occurrences = self.occurrences.saturating_add(1);
    }

    pub(crate) const fn set_transitive_dependencies(&mut self, count: u64) {
        self.transitive_dependencies = count;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: x{} deps:{}",
            self.key, self.occurrences, self.transitive_dependencies
        )
    }
}
