//! Dependency graph of study items.
//!
//! # Overview
//!
//! [`KanjiGraph`] owns every node in a petgraph arena and resolves each
//! inserted item's components through a [`LookupProvider`]. Words decompose
//! into kanji, kanji into radicals:
//!
//! ```text
//! add("人形")
//!   人形 (vocabulary) ── catalog ──▶ 人 (kanji) ──▶ 人 (radical)
//!                                 ▶ 形 (kanji) ──▶ 开 (radical)
//!                                               ▶ 彡 (radical)
//! ```
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A depends on B". Outgoing neighbours are a node's
//! dependencies, incoming neighbours its dependents, so both views always
//! agree.
//!
//! ## Submodules
//!
//! - [`compound`]: composing a word from known word fragments.
//! - [`order`]: complexity and frequency orderings.
//! - [`sequence`]: deck sequences (riffled, layered, frequency).
//! - [`diagnostics`]: cycles, stats and dependency trees.

pub mod compound;
pub mod diagnostics;
pub mod order;
pub mod sequence;

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument, warn};

use crate::kind::ItemKind;
use crate::lookup::{ComponentRef, LookupProvider};
use crate::node::{Node, NodeId, NodeKey};
use crate::script::{has_decomposable, is_kana};

pub use diagnostics::{DependencyTree, GraphStats};
pub use sequence::DeckOrder;

// ---------------------------------------------------------------------------
// KanjiGraph
// ---------------------------------------------------------------------------

/// The universe of study items discovered from a text, with their
/// composition edges.
///
/// Built once per deck and discarded after the order is read out. Nodes are
/// never removed.
#[derive(Debug)]
pub struct KanjiGraph<P> {
    provider: P,
    graph: DiGraph<Node, ()>,
    node_map: HashMap<NodeKey, NodeIndex>,
}

impl<P: LookupProvider> KanjiGraph<P> {
    /// Create an empty graph resolving components through `provider`.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a vocabulary item found in text.
    ///
    /// Returns `None` without touching the graph when `text` is made only of
    /// kana: there is nothing to decompose.
    #[instrument(skip(self), level = "debug")]
    pub fn add(&mut self, text: &str) -> Option<NodeId> {
        if !has_decomposable(text) {
            return None;
        }
        Some(self.insert(text, ItemKind::CompoundWord))
    }

    /// Insert `(value, kind)`, discovering its components on first sight.
    ///
    /// Re-inserting a known identity only bumps its occurrence count; its
    /// components are not looked up again.
    ///
    /// # Panics
    ///
    /// Panics if `value` is empty.
    pub fn insert(&mut self, value: &str, kind: ItemKind) -> NodeId {
        let key = NodeKey::new(value, kind);
        if let Some(&idx) = self.node_map.get(&key) {
            self.graph[idx].bump();
            return NodeId(idx);
        }

        let id = self.register(key);
        match kind {
            ItemKind::Character => self.discover_character(id),
            ItemKind::CompoundWord => self.discover_compound_word(id),
            // Leaves. Whatever contains a primitive wires the edge.
            ItemKind::Primitive => {}
        }
        id
    }

    pub(crate) fn register(&mut self, key: NodeKey) -> NodeId {
        let idx = self.graph.add_node(Node::new(key.value.clone(), key.kind));
        self.node_map.insert(key, idx);
        NodeId(idx)
    }

    fn discover_character(&mut self, id: NodeId) {
        let value = self.graph[id.0].value().to_string();
        match self.provider.lookup(&value, ItemKind::Character) {
            Some(subject) => self.link_components(id, subject.components()),
            None => {
                warn!(value = %value, kind = %ItemKind::Character, "not found in catalog; keeping as a leaf");
            }
        }
    }

    fn discover_compound_word(&mut self, id: NodeId) {
        let value = self.graph[id.0].value().to_string();
        match self.provider.lookup(&value, ItemKind::CompoundWord) {
            Some(subject) if subject.is_catalogued() => {
                self.link_components(id, subject.components());
            }
            _ => {
                debug!(value = %value, "word not catalogued; decomposing per character");
                for c in value.chars().filter(|c| !is_kana(*c)) {
                    let dep = self.insert(c.encode_utf8(&mut [0; 4]), ItemKind::Character);
                    self.add_dependency(id, dep);
                }
            }
        }
    }

    fn link_components(&mut self, id: NodeId, components: &[ComponentRef]) {
        for component in components {
            let dep = self.insert(&component.node_value(), component.kind);
            self.add_dependency(id, dep);
        }
    }

    /// Record that `dependent` depends on `dependency`. Edges are a set.
    pub(crate) fn add_dependency(&mut self, dependent: NodeId, dependency: NodeId) {
        if !self.graph.contains_edge(dependent.0, dependency.0) {
            self.graph.add_edge(dependent.0, dependency.0, ());
        }
    }
}

impl<P> KanjiGraph<P> {
    /// The provider this graph resolves components through.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different graph and is out of range.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.graph[id.0]
    }

    /// Look up a node by identity.
    #[must_use]
    pub fn get(&self, value: &str, kind: ItemKind) -> Option<NodeId> {
        self.node_map
            .get(&NodeKey::new(value, kind))
            .copied()
            .map(NodeId)
    }

    #[must_use]
    pub fn contains(&self, value: &str, kind: ItemKind) -> bool {
        self.get(value, kind).is_some()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices().map(NodeId)
    }

    /// Nodes of one tier, in insertion order.
    pub fn nodes_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .node_indices()
            .filter(move |idx| self.graph[*idx].kind() == kind)
            .map(NodeId)
    }

    pub fn primitives(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes_of_kind(ItemKind::Primitive)
    }

    pub fn characters(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes_of_kind(ItemKind::Character)
    }

    pub fn compound_words(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes_of_kind(ItemKind::CompoundWord)
    }

    /// Items `id` is composed from.
    pub fn dependencies(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .neighbors_directed(id.0, Direction::Outgoing)
            .map(NodeId)
    }

    /// Items that contain `id`.
    pub fn dependents(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .neighbors_directed(id.0, Direction::Incoming)
            .map(NodeId)
    }

    /// `true` when `dependency` is registered under its own key. Always the
    /// case for arena nodes; traversal checks it before following an edge.
    pub(crate) fn is_registered(&self, idx: NodeIndex) -> bool {
        self.graph
            .node_weight(idx)
            .is_some_and(|node| self.node_map.get(node.key()) == Some(&idx))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
