//! Complexity and frequency orderings.
//!
//! # Complexity
//!
//! The complexity of a node is its transitive dependency count:
//!
//! ```text
//! count(N) = Σ over dependencies D of N, D ≠ N:  1 + count(D)
//! ```
//!
//! Shared sub-trees are counted once per path, so a word using the same
//! kanji twice through different fragments pays for it twice. Counts are
//! recomputed on request with a memo that lives for one call; they are not
//! kept up to date as the graph grows.
//!
//! The traversal is an explicit stack. A dependency that is already on the
//! current path closes a cycle and is skipped, the same way a self-edge is,
//! so malformed catalogs cannot hang or overflow the stack.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use super::KanjiGraph;
use crate::node::NodeId;

impl<P> KanjiGraph<P> {
    /// Sort `nodes` by ascending complexity, ties broken by value.
    ///
    /// Refreshes the cached [`transitive_dependencies`] of every node visited
    /// along the way. Nodes with equal count and equal value (the same text
    /// in different tiers) keep their input order.
    ///
    /// [`transitive_dependencies`]: crate::node::Node::transitive_dependencies
    pub fn order_by_complexity<I>(&mut self, nodes: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut ids: Vec<NodeId> = nodes.into_iter().collect();
        self.refresh_complexity(&ids);
        self.sort_by_cached_complexity(&mut ids);
        ids
    }

    /// Stable sort of `nodes` by occurrence count, most frequent first.
    #[must_use]
    pub fn order_by_frequency<I>(&self, nodes: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut ids: Vec<NodeId> = nodes.into_iter().collect();
        ids.sort_by(|a, b| {
            self.graph[b.0]
                .occurrences()
                .cmp(&self.graph[a.0].occurrences())
        });
        ids
    }

    /// Recompute transitive counts for `ids` and everything they reach.
    pub(crate) fn refresh_complexity(&mut self, ids: &[NodeId]) {
        let mut memo: HashMap<NodeIndex, u64> = HashMap::new();
        for id in ids {
            self.transitive_count(id.0, &mut memo);
        }
        for (idx, count) in memo {
            self.graph[idx].set_transitive_dependencies(count);
        }
    }

    /// Sort by the counts cached on the nodes, without recomputing them.
    pub(crate) fn sort_by_cached_complexity(&self, ids: &mut [NodeId]) {
        ids.sort_by(|a, b| self.compare_complexity(*a, *b));
    }

    fn compare_complexity(&self, a: NodeId, b: NodeId) -> Ordering {
        let (na, nb) = (&self.graph[a.0], &self.graph[b.0]);
        na.transitive_dependencies()
            .cmp(&nb.transitive_dependencies())
            .then_with(|| na.value().cmp(nb.value()))
    }

    /// Dependencies that contribute to a node's count, in insertion order.
    fn counted_dependencies(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut deps: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter(|dep| *dep != idx && self.is_registered(*dep))
            .collect();
        // Popped from the back: oldest node first.
        deps.sort_unstable_by(|a, b| b.cmp(a));
        deps
    }

    fn transitive_count(&self, root: NodeIndex, memo: &mut HashMap<NodeIndex, u64>) -> u64 {
        if let Some(&count) = memo.get(&root) {
            return count;
        }

        // (node, dependencies still to visit, running total)
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, u64)> =
            vec![(root, self.counted_dependencies(root), 0)];
        let mut on_path: HashSet<NodeIndex> = HashSet::from([root]);

        while let Some((_, pending, total)) = stack.last_mut() {
            if let Some(dep) = pending.pop() {
                if on_path.contains(&dep) {
                    continue;
                }
                if let Some(&count) = memo.get(&dep) {
                    *total = total.saturating_add(count.saturating_add(1));
                    continue;
                }
                on_path.insert(dep);
                let deps = self.counted_dependencies(dep);
                stack.push((dep, deps, 0));
            } else {
                let Some((node, _, total)) = stack.pop() else {
                    break;
                };
                on_path.remove(&node);
                memo.insert(node, total);
                if let Some((_, _, parent_total)) = stack.last_mut() {
                    *parent_total = parent_total.saturating_add(total.saturating_add(1));
                }
            }
        }

        memo.get(&root).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::KanjiGraph;
    use crate::graph::tests::simple_provider;
    use crate::kind::ItemKind;
    use crate::lookup::StaticProvider;
    use crate::node::NodeId;

    fn values<P>(graph: &KanjiGraph<P>, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| graph.node(*id).value().to_string())
            .collect()
    }

    #[test]
    fn simple_word_orders_primitives_then_kanji_then_word() {
        let mut graph = KanjiGraph::new(simple_provider());
        graph.add("人形");

        let all: Vec<NodeId> = graph.nodes().collect();
        let ordered = graph.order_by_complexity(all);

        // 人 < 开 < 彡 by code point.
        assert_eq!(
            values(&graph, &ordered),
            vec!["人", "开", "彡", "人", "形", "人形"]
        );
        let counts: Vec<u64> = ordered
            .iter()
            .map(|id| graph.node(*id).transitive_dependencies())
            .collect();
        assert_eq!(counts, vec![0, 0, 0, 1, 2, 5]);
    }

    #[test]
    fn vocabulary_orders_by_count_then_value() {
        let mut graph = KanjiGraph::new(simple_provider());
        for word in ["人形", "人", "形"] {
            graph.add(word);
        }
        graph.add_compound_word(&["人形", "人人"]);

        let vocab: Vec<NodeId> = graph.compound_words().collect();
        let ordered = graph.order_by_complexity(vocab);
        assert_eq!(
            values(&graph, &ordered),
            vec!["人", "人人", "形", "人形", "人形人人"]
        );

        let kanji: Vec<NodeId> = graph.characters().collect();
        let ordered = graph.order_by_complexity(kanji);
        assert_eq!(values(&graph, &ordered), vec!["人", "形"]);
    }

    #[test]
    fn ordering_is_deterministic() {
        let mut graph = KanjiGraph::new(simple_provider());
        graph.add("人形");
        graph.add("形");

        let all: Vec<NodeId> = graph.nodes().collect();
        let first = graph.order_by_complexity(all.clone());
        let second = graph.order_by_complexity(all.into_iter().rev());
        assert_eq!(first, second);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let mut graph = KanjiGraph::new(StaticProvider::new());
        let radical = graph.insert("人", ItemKind::Primitive);
        let kanji = graph.insert("人", ItemKind::Character);

        assert_eq!(
            graph.order_by_complexity([radical, kanji]),
            vec![radical, kanji]
        );
        assert_eq!(
            graph.order_by_complexity([kanji, radical]),
            vec![kanji, radical]
        );
    }

    #[test]
    fn self_edges_do_not_count() {
        let provider = StaticProvider::new().with_components(
            "口",
            ItemKind::Character,
            &[("口", ItemKind::Character), ("丨", ItemKind::Primitive)],
        );
        let mut graph = KanjiGraph::new(provider);
        let mouth = graph.insert("口", ItemKind::Character);

        graph.order_by_complexity([mouth]);
        assert_eq!(graph.node(mouth).transitive_dependencies(), 1);
    }

    #[test]
    fn longer_cycles_terminate() {
        let provider = StaticProvider::new()
            .with_components("甲", ItemKind::Character, &[("乙", ItemKind::Character)])
            .with_components("乙", ItemKind::Character, &[("丙", ItemKind::Character)])
            .with_components(
                "丙",
                ItemKind::Character,
                &[("甲", ItemKind::Character), ("丶", ItemKind::Primitive)],
            );
        let mut graph = KanjiGraph::new(provider);
        let a = graph.insert("甲", ItemKind::Character);
        assert_eq!(graph.len(), 4);

        let all: Vec<NodeId> = graph.nodes().collect();
        let ordered = graph.order_by_complexity(all);
        assert_eq!(ordered.len(), 4);
        // 甲 → 乙 → 丙 → 丶, with 丙 → 甲 skipped as a back edge.
        assert_eq!(graph.node(a).transitive_dependencies(), 3);
    }

    #[test]
    fn shared_dependencies_count_per_path() {
        let mut graph = KanjiGraph::new(simple_provider());
        let word = graph.add_compound_word(&["人形", "人人"]).unwrap();

        graph.order_by_complexity([word]);
        // 人形 (5) + 1, 人人 (2) + 1.
        assert_eq!(graph.node(word).transitive_dependencies(), 9);
    }

    #[test]
    fn frequency_is_descending_and_stable() {
        let mut graph = KanjiGraph::new(simple_provider());
        for word in ["人形", "人", "形"] {
            graph.add(word);
        }
        graph.add_compound_word(&["人形", "人人"]);

        let all: Vec<NodeId> = graph.nodes().collect();
        let ordered = graph.order_by_frequency(all);

        let of_kind = |kind: ItemKind| -> Vec<String> {
            ordered
                .iter()
                .filter(|id| graph.node(**id).kind() == kind)
                .map(|id| graph.node(*id).value().to_string())
                .collect()
        };

        let vocab = of_kind(ItemKind::CompoundWord);
        assert_eq!(vocab.len(), 5);
        assert_eq!(vocab[0], "人形");
        assert_eq!(of_kind(ItemKind::Character), vec!["人", "形"]);
        // All radicals seen once: insertion order survives.
        assert_eq!(of_kind(ItemKind::Primitive), vec!["人", "开", "彡"]);
    }

    #[test]
    fn repeated_word_ranks_first_by_frequency() {
        let mut graph = KanjiGraph::new(StaticProvider::new());
        graph.add("山");
        for _ in 0..3 {
            graph.insert("人", ItemKind::CompoundWord);
        }
        let person = graph.get("人", ItemKind::CompoundWord).unwrap();
        assert_eq!(graph.node(person).occurrences(), 3);

        let words: Vec<NodeId> = graph.compound_words().collect();
        assert_eq!(graph.order_by_frequency(words)[0], person);
    }
}
