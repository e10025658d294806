//! End-to-end checks against a small hand-built catalog.
//!
//! 人形 → {人, 形}; 人 → {人}; 形 → {开, 彡}. The vocabulary 人 and 形 are
//! not catalogued and decompose character by character.

use kanjideck_core::{DeckOrder, ItemKind, KanjiGraph, LookupProvider, NodeId, StaticProvider};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn catalog() -> StaticProvider {
    StaticProvider::new()
        .with_components(
            "人形",
            ItemKind::CompoundWord,
            &[("人", ItemKind::Character), ("形", ItemKind::Character)],
        )
        .with_components("人", ItemKind::Character, &[("人", ItemKind::Primitive)])
        .with_components(
            "形",
            ItemKind::Character,
            &[("开", ItemKind::Primitive), ("彡", ItemKind::Primitive)],
        )
}

fn populated<P: LookupProvider>(provider: P) -> KanjiGraph<P> {
    let mut graph = KanjiGraph::new(provider);
    for word in ["人形", "人", "形"] {
        graph.add(word);
    }
    graph.add_compound_word(&["人形", "人人"]);
    graph
}

fn values<P>(graph: &KanjiGraph<P>, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| graph.node(*id).value().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

#[test]
fn vocabulary_complexity_order_and_counts() {
    let mut graph = populated(catalog());
    let words: Vec<NodeId> = graph.compound_words().collect();
    let ordered = graph.order_by_complexity(words);

    assert_eq!(
        values(&graph, &ordered),
        vec!["人", "人人", "形", "人形", "人形人人"]
    );
    let counts: Vec<u64> = ordered
        .iter()
        .map(|id| graph.node(*id).transitive_dependencies())
        .collect();
    assert_eq!(counts, vec![2, 2, 3, 5, 9]);
}

#[test]
fn kanji_complexity_order() {
    let mut graph = populated(catalog());
    let kanji: Vec<NodeId> = graph.characters().collect();
    let ordered = graph.order_by_complexity(kanji);
    assert_eq!(values(&graph, &ordered), vec!["人", "形"]);
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

#[test]
fn frequency_ranks_repeated_items_first() {
    let graph = populated(catalog());

    let words = graph.order_by_frequency(graph.compound_words().collect::<Vec<_>>());
    assert_eq!(graph.node(words[0]).value(), "人形");
    assert_eq!(graph.node(words[0]).occurrences(), 2);

    let kanji = graph.order_by_frequency(graph.characters().collect::<Vec<_>>());
    assert_eq!(values(&graph, &kanji), vec!["人", "形"]);

    let radicals = graph.order_by_frequency(graph.primitives().collect::<Vec<_>>());
    assert_eq!(graph.node(radicals[0]).value(), "人");
}

// ---------------------------------------------------------------------------
// Sequencing
// ---------------------------------------------------------------------------

#[test]
fn riffled_deck_for_compound() {
    let mut graph = populated(catalog());
    let deck = graph.sequence(DeckOrder::Riffled);

    let keys: Vec<String> = deck
        .iter()
        .map(|id| graph.node(*id).key().to_string())
        .collect();
    let expected: Vec<String> = [
        ("人", ItemKind::Primitive),
        ("人", ItemKind::Character),
        ("人", ItemKind::CompoundWord),
        ("人人", ItemKind::CompoundWord),
        ("开", ItemKind::Primitive),
        ("彡", ItemKind::Primitive),
        ("形", ItemKind::Character),
        ("形", ItemKind::CompoundWord),
        ("人形", ItemKind::CompoundWord),
        ("人形人人", ItemKind::CompoundWord),
    ]
    .iter()
    .map(|(value, kind)| kanjideck_core::NodeKey::new(*value, *kind).to_string())
    .collect();
    assert_eq!(keys, expected);
}

#[test]
fn graph_accepts_trait_object_provider() {
    let provider = catalog();
    let dynamic: &dyn LookupProvider = &provider;
    let mut graph = populated(dynamic);

    assert_eq!(graph.len(), 10);
    assert!(graph.find_cycles().is_empty());
    assert_eq!(graph.sequence(DeckOrder::Layered).len(), 10);
}
