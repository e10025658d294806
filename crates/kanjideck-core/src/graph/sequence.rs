//! Deck sequences: the order cards are studied in.
//!
//! - **Riffled**: words in complexity order, each preceded by whichever of
//!   its prerequisites have not been shown yet. Words become studyable as
//!   soon as their parts are known.
//! - **Layered**: every node in complexity order. Radicals lead, and a word
//!   never precedes its kanji, but tiers of equal count interleave.
//! - **Frequency**: like riffled, but the most frequent words lead.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::KanjiGraph;
use crate::kind::{ParseEnumError, normalize};
use crate::node::NodeId;

/// How a deck is sequenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckOrder {
    #[default]
    Riffled,
    Layered,
    Frequency,
}

impl DeckOrder {
    pub const ALL: [Self; 3] = [Self::Riffled, Self::Layered, Self::Frequency];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Riffled => "riffled",
            Self::Layered => "layered",
            Self::Frequency => "frequency",
        }
    }
}

impl fmt::Display for DeckOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeckOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "riffled" => Ok(Self::Riffled),
            "layered" => Ok(Self::Layered),
            "frequency" => Ok(Self::Frequency),
            _ => Err(ParseEnumError {
                expected: "deck order",
                got: s.to_string(),
            }),
        }
    }
}

impl<P> KanjiGraph<P> {
    /// The deck sequenced by `order`.
    ///
    /// Layered covers every node; riffled and frequency cover the words and
    /// everything they reach.
    #[instrument(skip(self), fields(nodes = self.len()))]
    pub fn sequence(&mut self, order: DeckOrder) -> Vec<NodeId> {
        let words: Vec<NodeId> = self.compound_words().collect();
        match order {
            DeckOrder::Layered => {
                let all: Vec<NodeId> = self.nodes().collect();
                self.order_by_complexity(all)
            }
            DeckOrder::Riffled => {
                let roots = self.order_by_complexity(words);
                self.riffle(roots)
            }
            DeckOrder::Frequency => {
                let roots = self.order_by_frequency(words);
                self.riffle(roots)
            }
        }
    }

    /// Depth-first post-order from each root, in the given root order.
    ///
    /// A node is emitted once, after all of its dependencies; siblings are
    /// visited in complexity order. Cycles are cut at the first node seen
    /// again.
    pub fn riffle<I>(&mut self, roots: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let roots: Vec<NodeId> = roots.into_iter().collect();
        self.refresh_complexity(&roots);

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut out = Vec::new();

        for root in roots {
            if !seen.insert(root) {
                continue;
            }
            // (node, dependencies not yet visited, in reverse visiting order)
            let mut stack: Vec<(NodeId, Vec<NodeId>)> = vec![(root, self.visit_order(root))];
            while let Some((node, pending)) = stack.last_mut() {
                match pending.pop() {
                    Some(dep) => {
                        if seen.insert(dep) {
                            let deps = self.visit_order(dep);
                            stack.push((dep, deps));
                        }
                    }
                    None => {
                        out.push(*node);
                        stack.pop();
                    }
                }
            }
        }
        out
    }

    /// Dependencies of `id` sorted by cached complexity, reversed for popping.
    fn visit_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut deps: Vec<NodeId> = self.dependencies(id).filter(|dep| *dep != id).collect();
        self.sort_by_cached_complexity(&mut deps);
        deps.reverse();
        deps
    }
}
