//! Study cards rendered from a sequenced graph.

use std::io::{self, Write};

use kanjideck_core::{
    DeckOrder, GraphStats, ItemKind, KanjiGraph, LookupProvider, NodeId, Subject, SubjectSource,
};
use serde::Serialize;
use tracing::warn;

use crate::output::{pretty_kv, pretty_rule, pretty_section};

/// Catalog markup wrapped around emphasised terms in mnemonics.
const MARKUP_TAGS: [&str; 5] = ["radical", "kanji", "vocabulary", "reading", "ja"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Stable across builds of the same subject.
    pub guid: String,
    pub value: String,
    pub kind: ItemKind,
    pub occurrences: u32,
    pub complexity: u64,
    pub characters: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub reading: String,
    pub meaning: String,
    pub components: Vec<String>,
    pub parts_of_speech: String,
    pub meaning_mnemonic: String,
    pub reading_mnemonic: String,
    pub source: SubjectSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    pub name: String,
    pub order: DeckOrder,
    pub stats: GraphStats,
    /// Nodes left out because no subject could be found for them.
    pub skipped: usize,
    pub cards: Vec<Card>,
}

/// `kd-` plus the first 16 hex digits of BLAKE3 over `characters \0 kind`,
/// where subjects without characters use their id.
pub fn card_guid(subject: &Subject, kind: ItemKind) -> String {
    let id = subject.id().to_string();
    let characters = match subject.characters() {
        "" => id.as_str(),
        chars => chars,
    };

    let mut hasher = blake3::Hasher::new();
    hasher.update(characters.as_bytes());
    hasher.update(&[0]);
    hasher.update(kind.as_str().as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("kd-{}", &hex.as_str()[..16])
}

/// Remove catalog emphasis tags, keeping their contents.
pub fn strip_markup(text: &str) -> String {
    let mut out = text.to_string();
    for tag in MARKUP_TAGS {
        out = out
            .replace(&format!("<{tag}>"), "")
            .replace(&format!("</{tag}>"), "");
    }
    out
}

pub fn card(subject: &Subject, value: &str, kind: ItemKind, occurrences: u32, complexity: u64) -> Card {
    let card_kind = subject.kind().unwrap_or(kind);
    Card {
        guid: card_guid(subject, card_kind),
        value: value.to_string(),
        kind: card_kind,
        occurrences,
        complexity,
        characters: subject.characters().to_string(),
        image: subject.image().map(str::to_string),
        reading: subject.reading(),
        meaning: subject.meaning(),
        components: subject
            .components()
            .iter()
            .map(kanjideck_core::ComponentRef::node_value)
            .collect(),
        parts_of_speech: subject.parts_of_speech(),
        meaning_mnemonic: strip_markup(subject.meaning_mnemonic()),
        reading_mnemonic: strip_markup(subject.reading_mnemonic()),
        source: subject.source(),
    }
}

/// One card per node in `sequence` order. Returns the cards and how many
/// nodes were skipped because the provider had no subject for them.
pub fn cards<P: LookupProvider>(graph: &KanjiGraph<P>, sequence: &[NodeId]) -> (Vec<Card>, usize) {
    let mut cards = Vec::with_capacity(sequence.len());
    let mut skipped = 0;
    for &id in sequence {
        let node = graph.node(id);
        match graph.provider().lookup(node.value(), node.kind()) {
            Some(subject) => cards.push(card(
                &subject,
                node.value(),
                node.kind(),
                node.occurrences(),
                node.transitive_dependencies(),
            )),
            None => {
                warn!(value = node.value(), kind = %node.kind(), "no subject found; skipping card");
                skipped += 1;
            }
        }
    }
    (cards, skipped)
}

// ---------------------------------------------------------------------------
// Text and pretty renderers
// ---------------------------------------------------------------------------

pub fn write_deck_text(deck: &Deck, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "guid\tkind\tvalue\treading\tmeaning")?;
    for card in &deck.cards {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            card.guid, card.kind, card.value, card.reading, card.meaning
        )?;
    }
    Ok(())
}

pub fn write_deck_pretty(deck: &Deck, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("{} ({} order, {} cards)", deck.name, deck.order, deck.cards.len()),
    )?;
    for (i, card) in deck.cards.iter().enumerate() {
        let face = if card.characters.is_empty() {
            card.image.as_deref().unwrap_or(&card.value)
        } else {
            card.characters.as_str()
        };
        writeln!(w, "{:>4}. {face}  [{}]", i + 1, card.kind)?;
        pretty_kv(w, "  meaning", &card.meaning)?;
        pretty_kv(w, "  reading", &card.reading)?;
        pretty_kv(w, "  components", card.components.join(", "))?;
        pretty_kv(w, "  parts of speech", &card.parts_of_speech)?;
        pretty_kv(w, "  meaning mnemonic", &card.meaning_mnemonic)?;
        pretty_kv(w, "  reading mnemonic", &card.reading_mnemonic)?;
        pretty_kv(w, "  source", card.source.to_string())?;
    }
    pretty_rule(w)?;
    writeln!(
        w,
        "{} radicals, {} kanji, {} words; {} skipped",
        deck.stats.primitives, deck.stats.characters, deck.stats.compound_words, deck.skipped
    )
}
