//! `kd explain`: show what a word is built from.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Args;
use kanjideck_core::error::ErrorCode;
use kanjideck_core::{DependencyTree, ItemKind, KanjiGraph, LookupProvider};
use serde::Serialize;
use tracing::warn;

use crate::cmd::{CatalogArgs, load_config, open_catalog};
use crate::output::{OutputMode, WithCode, pretty_rule, render_mode};

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Words (or kanji, or radicals with --kind) to explain.
    #[arg(required = true, value_name = "WORD")]
    pub words: Vec<String>,

    /// Tier to look the items up as: vocabulary, kanji or radical.
    #[arg(long, default_value = "vocabulary")]
    pub kind: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Debug, Serialize)]
pub struct Explanation {
    pub trees: Vec<DependencyTree>,
    /// Inputs with nothing to decompose.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
}

/// Build one tree per item. Kana-only words are reported as ignored.
pub fn explain<P: LookupProvider>(provider: P, words: &[String], kind: ItemKind) -> Explanation {
    let mut graph = KanjiGraph::new(provider);
    let mut roots = Vec::new();
    let mut ignored = Vec::new();
    for word in words {
        let id = match kind {
            ItemKind::CompoundWord => graph.add(word),
            _ if word.is_empty() => None,
            _ => Some(graph.insert(word, kind)),
        };
        match id {
            Some(id) => roots.push(id),
            None => {
                warn!(word = %word, "nothing to decompose");
                ignored.push(word.clone());
            }
        }
    }

    let trees = roots.into_iter().map(|id| graph.dependency_tree(id)).collect();
    Explanation { trees, ignored }
}

fn write_tree(tree: &DependencyTree, w: &mut dyn Write) -> io::Result<()> {
    let mut stack = vec![(tree, 0)];
    while let Some((tree, depth)) = stack.pop() {
        let marker = if tree.truncated {
            " (cycle)"
        } else if tree.repeated {
            " (see above)"
        } else {
            ""
        };
        writeln!(
            w,
            "{:indent$}{} [{}] complexity {}{marker}",
            "",
            tree.value,
            tree.kind,
            tree.transitive_dependencies,
            indent = depth * 2
        )?;
        stack.extend(tree.children.iter().rev().map(|child| (child, depth + 1)));
    }
    Ok(())
}

fn write_text(explanation: &Explanation, w: &mut dyn Write) -> io::Result<()> {
    for tree in &explanation.trees {
        let parts: Vec<&str> = tree.children.iter().map(|c| c.value.as_str()).collect();
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            tree.value,
            tree.kind,
            tree.transitive_dependencies,
            parts.join(" ")
        )?;
    }
    Ok(())
}

fn write_pretty(explanation: &Explanation, w: &mut dyn Write) -> io::Result<()> {
    for (i, tree) in explanation.trees.iter().enumerate() {
        if i > 0 {
            pretty_rule(w)?;
        }
        write_tree(tree, w)?;
    }
    if !explanation.ignored.is_empty() {
        writeln!(w, "ignored: {}", explanation.ignored.join(", "))?;
    }
    Ok(())
}

pub fn run_explain(args: &ExplainArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let kind: ItemKind = args.kind.parse().with_code(ErrorCode::InvalidEnumValue)?;
    let config = load_config(project_root)?;
    let catalog = open_catalog(&args.catalog, &config)?;

    let explanation = explain(&catalog, &args.words, kind);
    render_mode(output, &explanation, write_text, write_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanjideck_core::StaticProvider;

    fn provider() -> StaticProvider {
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

    #[test]
    fn trees_follow_components() {
        let explanation = explain(provider(), &["人形".to_string()], ItemKind::CompoundWord);
        let tree = &explanation.trees[0];
        assert_eq!(tree.value, "人形");
        assert_eq!(tree.size(), 6);
        assert_eq!(tree.depth(), 2);
        assert!(explanation.ignored.is_empty());
    }

    #[test]
    fn kana_words_are_ignored() {
        let words = vec!["ばか".to_string(), "形".to_string()];
        let explanation = explain(provider(), &words, ItemKind::CompoundWord);
        assert_eq!(explanation.ignored, vec!["ばか"]);
        assert_eq!(explanation.trees.len(), 1);
    }

    #[test]
    fn kanji_can_be_explained_directly() {
        let explanation = explain(provider(), &["形".to_string()], ItemKind::Character);
        let tree = &explanation.trees[0];
        assert_eq!(tree.kind, ItemKind::Character);
        let children: Vec<&str> = tree.children.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(children, vec!["开", "彡"]);
    }

    #[test]
    fn pretty_tree_is_indented() {
        let explanation = explain(provider(), &["人".to_string()], ItemKind::Character);
        let mut buf = Vec::new();
        write_pretty(&explanation, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["人 [kanji] complexity 1", "  人 [radical] complexity 0"]);
    }

    #[test]
    fn shared_radical_is_printed_once() {
        let provider = provider().with_components(
            "休",
            ItemKind::Character,
            &[("人", ItemKind::Primitive), ("木", ItemKind::Primitive)],
        );
        let explanation = explain(provider, &["人休".to_string()], ItemKind::CompoundWord);
        let mut buf = Vec::new();
        write_pretty(&explanation, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "人休 [vocabulary] complexity 5",
                "  人 [kanji] complexity 1",
                "    人 [radical] complexity 0",
                "  休 [kanji] complexity 2",
                "    人 [radical] complexity 0 (see above)",
                "    木 [radical] complexity 0",
            ]
        );
    }
}
