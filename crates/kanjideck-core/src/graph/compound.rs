//! Compound words assembled from known word fragments.
//!
//! A tokenizer may split `形態素解析器` into `形態素`, `解析` and `器`. The
//! compound gets its own node whose dependencies are the fragment words, so
//! fragments are shared with every other word that uses them.

use tracing::instrument;

use super::KanjiGraph;
use crate::kind::ItemKind;
use crate::lookup::LookupProvider;
use crate::node::{NodeId, NodeKey};
use crate::script::has_decomposable;

impl<P: LookupProvider> KanjiGraph<P> {
    /// Add the word formed by concatenating `fragments` in order.
    ///
    /// Returns `None` when there are no fragments or when any fragment is
    /// kana only. A compound that already exists only has its occurrence
    /// count bumped. A single fragment is the word itself.
    #[instrument(skip(self, fragments), level = "debug", fields(parts = fragments.len()))]
    pub fn add_compound_word<S: AsRef<str>>(&mut self, fragments: &[S]) -> Option<NodeId> {
        if fragments.is_empty()
            || fragments
                .iter()
                .any(|fragment| !has_decomposable(fragment.as_ref()))
        {
            return None;
        }

        if let [word] = fragments {
            return Some(self.insert(word.as_ref(), ItemKind::CompoundWord));
        }

        let value: String = fragments.iter().map(AsRef::<str>::as_ref).collect();
        if let Some(existing) = self.get(&value, ItemKind::CompoundWord) {
            self.graph[existing.0].bump();
            return Some(existing);
        }

        let compound = self.register(NodeKey::new(value, ItemKind::CompoundWord));
        for fragment in fragments {
            let part = self.insert(fragment.as_ref(), ItemKind::CompoundWord);
            self.add_dependency(compound, part);
        }
        Some(compound)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::KanjiGraph;
    use crate::graph::tests::simple_provider;
    use crate::kind::ItemKind;
    use crate::lookup::StaticProvider;

    #[test]
    fn compound_of_unknown_fragments() {
        let mut graph = KanjiGraph::new(StaticProvider::new());
        let compound = graph.add_compound_word(&["bing", "bong"]).unwrap();

        assert!(graph.contains("bing", ItemKind::CompoundWord));
        assert!(graph.contains("bong", ItemKind::CompoundWord));
        assert_eq!(graph.node(compound).value(), "bingbong");
        for c in "bingbong".chars() {
            assert!(graph.contains(&c.to_string(), ItemKind::Character));
        }
        assert_eq!(graph.compound_words().count(), 3);
        assert_eq!(graph.dependencies(compound).count(), 2);
    }

    #[test]
    fn compound_itself_is_not_decomposed_per_character() {
        let mut graph = KanjiGraph::new(simple_provider());
        let compound = graph.add_compound_word(&["人形", "人"]).unwrap();

        let word = graph.get("人形", ItemKind::CompoundWord).unwrap();
        let person = graph.get("人", ItemKind::CompoundWord).unwrap();
        let mut deps: Vec<_> = graph.dependencies(compound).collect();
        deps.sort();
        assert_eq!(deps, vec![word, person]);
        assert_eq!(graph.node(compound).value(), "人形人");
    }

    #[test]
    fn fragments_are_shared_with_prior_words() {
        let mut graph = KanjiGraph::new(simple_provider());
        let person = graph.add("人").unwrap();
        graph.add_compound_word(&["人形", "人"]).unwrap();

        assert_eq!(graph.get("人", ItemKind::CompoundWord), Some(person));
        assert_eq!(graph.node(person).occurrences(), 2);
    }

    #[test]
    fn repeated_compound_is_idempotent() {
        let mut graph = KanjiGraph::new(simple_provider());
        let first = graph.add_compound_word(&["人形", "人"]).unwrap();
        let len = graph.len();
        let second = graph.add_compound_word(&["人形", "人"]).unwrap();

        assert_eq!(first, second);
        assert_eq!(graph.len(), len);
        assert_eq!(graph.node(first).occurrences(), 2);
        // Fragments are not revisited.
        let word = graph.get("人形", ItemKind::CompoundWord).unwrap();
        assert_eq!(graph.node(word).occurrences(), 1);
    }

    #[test]
    fn kana_fragment_rejects_compound() {
        let mut graph = KanjiGraph::new(simple_provider());
        assert!(graph.add_compound_word(&["人形", "です"]).is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn empty_fragment_list_is_rejected() {
        let mut graph = KanjiGraph::new(simple_provider());
        let none: [&str; 0] = [];
        assert!(graph.add_compound_word(&none).is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn single_fragment_is_the_word_without_self_edge() {
        let mut graph = KanjiGraph::new(simple_provider());
        let word = graph.add_compound_word(&["人形"]).unwrap();

        assert_eq!(graph.get("人形", ItemKind::CompoundWord), Some(word));
        assert_eq!(graph.node(word).occurrences(), 1);
        assert!(graph.dependencies(word).all(|dep| dep != word));
        // Decomposed through the provider like any other word.
        assert_eq!(graph.dependencies(word).count(), 2);
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn compound_matching_existing_word_reuses_it() {
        let mut graph = KanjiGraph::new(simple_provider());
        let word = graph.add("人形").unwrap();
        let compound = graph.add_compound_word(&["人", "形"]).unwrap();

        assert_eq!(word, compound);
        assert_eq!(graph.node(word).occurrences(), 2);
    }
}
