//! `kd build`: turn a Japanese text into an ordered study deck.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Args;
use kanjideck_core::error::ErrorCode;
use kanjideck_core::{DeckOrder, KanjiGraph, LookupProvider};
use tracing::{info, warn};

use crate::cmd::{CatalogArgs, load_config, open_catalog};
use crate::output::{CodedError, OutputMode, WithCode, render_mode, render_mode_to};
use crate::render::{self, Deck, write_deck_pretty, write_deck_text};
use crate::tokenize::{InputFormat, Token};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// UTF-8 text (or word list) to build the deck from.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Card order: riffled, layered or frequency [default: from config, else riffled].
    #[arg(long, value_name = "ORDER")]
    pub order: Option<String>,

    /// How to read SOURCE.
    #[arg(long, value_enum, default_value_t = InputFormat::Text)]
    pub input: InputFormat,

    /// Deck name shown in the output.
    #[arg(long)]
    pub name: Option<String>,

    /// Write the deck here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Feed tokens into the graph. Returns how many tokens became words.
pub fn add_tokens<P: LookupProvider>(graph: &mut KanjiGraph<P>, tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|token| match token {
            Token::Word(word) => graph.add(word).is_some(),
            Token::Compound(fragments) => graph.add_compound_word(fragments).is_some(),
        })
        .count()
}

fn parse_order(flag: Option<&str>, configured: DeckOrder) -> Result<DeckOrder> {
    flag.map(str::parse::<DeckOrder>)
        .transpose()
        .with_code(ErrorCode::InvalidEnumValue)
        .map(|order| order.unwrap_or(configured))
}

pub fn run_build(args: &BuildArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let config = load_config(project_root)?;
    let order = parse_order(args.order.as_deref(), config.order)?;
    let name = args.name.clone().unwrap_or_else(|| config.deck_name.clone());
    let catalog = open_catalog(&args.catalog, &config)?;

    let text = std::fs::read_to_string(&args.source)
        .with_context(|| format!("Failed to read {}", args.source.display()))
        .with_code(ErrorCode::SourceReadFailed)?;
    let tokens = args.input.tokenizer(&catalog).tokenize(&text);

    let provider: &dyn LookupProvider = &catalog;
    let mut graph = KanjiGraph::new(provider);
    let words = add_tokens(&mut graph, &tokens);
    info!(tokens = tokens.len(), words, nodes = graph.len(), "graph built");

    if words == 0 {
        return Err(CodedError {
            code: ErrorCode::EmptyDeck,
            source: anyhow!("no kanji words found in {}", args.source.display()),
        }
        .into());
    }

    for cycle in graph.find_cycles() {
        let members: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        warn!(members = %members.join(", "), "catalog contains a dependency cycle");
    }

    let sequence = graph.sequence(order);
    let (cards, skipped) = render::cards(&graph, &sequence);
    let deck = Deck {
        name,
        order,
        stats: graph.stats(),
        skipped,
        cards,
    };
    info!(order = %order, cards = deck.cards.len(), skipped, "deck sequenced");

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))
                .with_code(ErrorCode::OutputWriteFailed)?;
            let mut writer = BufWriter::new(file);
            render_mode_to(&mut writer, output, &deck, write_deck_text, write_deck_pretty)
                .with_code(ErrorCode::OutputWriteFailed)?;
            info!(path = %path.display(), "deck written");
            Ok(())
        }
        None => render_mode(output, &deck, write_deck_text, write_deck_pretty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CliError;
    use kanjideck_core::{ItemKind, StaticProvider};

    #[test]
    fn kana_tokens_are_not_words() {
        let provider = StaticProvider::new().with_components(
            "人",
            ItemKind::Character,
            &[("人", ItemKind::Primitive)],
        );
        let mut graph = KanjiGraph::new(provider);
        let tokens = vec![
            Token::Word("ムズカシイ".into()),
            Token::Word("人".into()),
            Token::Compound(vec!["人".into(), "形".into()]),
            Token::Compound(vec!["人".into(), "ばか".into()]),
        ];

        assert_eq!(add_tokens(&mut graph, &tokens), 2);
        assert!(graph.contains("人形", ItemKind::CompoundWord));
        assert!(!graph.contains("ムズカシイ", ItemKind::CompoundWord));
    }

    #[test]
    fn order_flag_overrides_config() {
        assert_eq!(
            parse_order(Some("Layered"), DeckOrder::Riffled).unwrap(),
            DeckOrder::Layered
        );
        assert_eq!(
            parse_order(None, DeckOrder::Frequency).unwrap(),
            DeckOrder::Frequency
        );
    }

    #[test]
    fn unknown_order_is_invalid_enum_value() {
        let err = parse_order(Some("alphabetical"), DeckOrder::Riffled).unwrap_err();
        let cli = CliError::from(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.message.contains("alphabetical"));
    }
}
