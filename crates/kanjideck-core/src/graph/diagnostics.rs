//! Cycle detection, summary statistics and dependency trees.
//!
//! Catalog data is expected to be acyclic, but nothing enforces it. The
//! orderings tolerate cycles; these helpers make them visible.

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use super::KanjiGraph;
use crate::kind::ItemKind;
use crate::node::{NodeId, NodeKey};

// ---------------------------------------------------------------------------
// Cycles
// ---------------------------------------------------------------------------

impl<P> KanjiGraph<P> {
    /// Every dependency cycle currently in the graph.
    ///
    /// Each entry is one strongly connected component with its members
    /// sorted; a self-loop is reported as a one-element cycle. The list is
    /// sorted too, so output is deterministic.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Vec<NodeKey>> {
        let mut cycles: Vec<Vec<NodeKey>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|idx| self.graph.contains_edge(*idx, *idx))
            })
            .map(|component| {
                let mut keys: Vec<NodeKey> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].key().clone())
                    .collect();
                keys.sort_unstable();
                keys
            })
            .collect();

        cycles.sort_unstable();
        cycles
    }

    /// Summary counts for logging and `--format json` output.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.len(),
            edges: self.edge_count(),
            primitives: self.nodes_of_kind(ItemKind::Primitive).count(),
            characters: self.nodes_of_kind(ItemKind::Character).count(),
            compound_words: self.nodes_of_kind(ItemKind::CompoundWord).count(),
            cycles: self.find_cycles().len(),
        }
    }

    /// The nested prerequisites of `id`, children in complexity order.
    ///
    /// Each node is expanded once, at its first position in depth-first
    /// order. Later mentions are leaves with `repeated` set, and a
    /// dependency already on the path from the root closes a cycle and is a
    /// leaf with `truncated` set. The tree therefore has one entry per edge
    /// reachable from `id`, plus the root.
    pub fn dependency_tree(&mut self, id: NodeId) -> DependencyTree {
        self.refresh_complexity(&[id]);

        let mut on_path = HashSet::new();
        let mut expanded = HashSet::new();
        let mut root = self.open_frame(id.0, &mut on_path, &mut expanded);
        let mut stack: Vec<TreeFrame> = Vec::new();

        loop {
            let next = top_frame(&mut root, &mut stack).pending.next();
            match next {
                Some(dep) if on_path.contains(&dep) => {
                    let mut leaf = self.tree_node(dep);
                    leaf.truncated = true;
                    top_frame(&mut root, &mut stack).tree.children.push(leaf);
                }
                Some(dep) if expanded.contains(&dep) => {
                    let mut leaf = self.tree_node(dep);
                    leaf.repeated = true;
                    top_frame(&mut root, &mut stack).tree.children.push(leaf);
                }
                Some(dep) => stack.push(self.open_frame(dep, &mut on_path, &mut expanded)),
                None => match stack.pop() {
                    Some(done) => {
                        on_path.remove(&done.idx);
                        top_frame(&mut root, &mut stack).tree.children.push(done.tree);
                    }
                    None => return root.tree,
                },
            }
        }
    }

    fn open_frame(
        &self,
        idx: NodeIndex,
        on_path: &mut HashSet<NodeIndex>,
        expanded: &mut HashSet<NodeIndex>,
    ) -> TreeFrame {
        on_path.insert(idx);
        expanded.insert(idx);

        let mut deps: Vec<NodeId> = self
            .dependencies(NodeId(idx))
            .filter(|dep| dep.0 != idx)
            .collect();
        self.sort_by_cached_complexity(&mut deps);
        TreeFrame {
            idx,
            tree: self.tree_node(idx),
            pending: deps.into_iter().map(|dep| dep.0).collect::<Vec<_>>().into_iter(),
        }
    }

    fn tree_node(&self, idx: NodeIndex) -> DependencyTree {
        let node = &self.graph[idx];
        DependencyTree {
            value: node.value().to_string(),
            kind: node.kind(),
            occurrences: node.occurrences(),
            transitive_dependencies: node.transitive_dependencies(),
            truncated: false,
            repeated: false,
            children: Vec::new(),
        }
    }
}

/// A tree node whose children are still being built.
struct TreeFrame {
    idx: NodeIndex,
    tree: DependencyTree,
    pending: std::vec::IntoIter<NodeIndex>,
}

fn top_frame<'a>(root: &'a mut TreeFrame, stack: &'a mut [TreeFrame]) -> &'a mut TreeFrame {
    match stack.last_mut() {
        Some(frame) => frame,
        None => root,
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Node and edge counts of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub primitives: usize,
    pub characters: usize,
    pub compound_words: usize,
    /// Number of dependency cycles, including self-loops.
    pub cycles: usize,
}

/// One node of a prerequisite tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyTree {
    pub value: String,
    pub kind: ItemKind,
    pub occurrences: u32,
    pub transitive_dependencies: u64,
    /// Set when this node closes a cycle; its children are omitted.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    /// Set when this node was expanded earlier in the tree; its children
    /// are omitted.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
    pub children: Vec<DependencyTree>,
}

impl DependencyTree {
    /// Number of nodes in the tree, the root included.
    #[must_use]
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            size += 1;
            stack.extend(&tree.children);
        }
        size
    }

    /// Longest root-to-leaf path, counted in edges.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((tree, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(tree.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}
