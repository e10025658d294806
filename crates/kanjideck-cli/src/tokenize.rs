//! Turning source text into vocabulary tokens.

use clap::ValueEnum;
use kanjideck_catalog::Catalog;
use kanjideck_core::script::{is_hiragana, is_ideograph, is_katakana};

/// Hiragana read past a kanji run when looking for a word's okurigana.
const MAX_OKURIGANA: usize = 5;

/// Dictionary-form endings tried after a conjugated stem, so that 食べた
/// resolves to 食べる and 高かった to 高い.
const DICTIONARY_ENDINGS: [&str; 10] = ["る", "い", "う", "く", "ぐ", "す", "つ", "ぬ", "ぶ", "む"];

/// A unit of vocabulary found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    /// A word spelled as known fragments, joined in order.
    Compound(Vec<String>),
}

pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Spellings the tokenizer may cut text into.
pub trait Vocabulary {
    fn is_word(&self, text: &str) -> bool;
}

impl Vocabulary for Catalog {
    fn is_word(&self, text: &str) -> bool {
        self.is_vocabulary(text)
    }
}

impl<V: Vocabulary + ?Sized> Vocabulary for &V {
    fn is_word(&self, text: &str) -> bool {
        (**self).is_word(text)
    }
}

/// How `kd build` reads its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Running Japanese text, cut into known words.
    #[default]
    Text,
    /// Whitespace-separated words; `+` joins compound fragments.
    Words,
}

impl InputFormat {
    pub fn tokenizer<'a>(self, vocabulary: &'a dyn Vocabulary) -> Box<dyn Tokenizer + 'a> {
        match self {
            Self::Text => Box::new(ScriptRunTokenizer::new(vocabulary)),
            Self::Words => Box::new(WordListTokenizer),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptRunTokenizer
// ---------------------------------------------------------------------------

/// Splits text into runs of kanji and runs of katakana. Any other character
/// ends the current run.
///
/// A katakana run is one word. A kanji run is cut into the longest known
/// words from left to right; the last word may take okurigana from the
/// hiragana that follows the run, in dictionary form when the text is
/// conjugated. Kanji that start no known word stay together as one part.
/// A run cut into several parts becomes a [`Token::Compound`], so both the
/// whole and its parts reach the deck.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRunTokenizer<V> {
    vocabulary: V,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Kanji,
    Katakana,
}

fn run_of(c: char) -> Option<Run> {
    if is_ideograph(c) {
        Some(Run::Kanji)
    } else if is_katakana(c) && c != '・' {
        Some(Run::Katakana)
    } else {
        None
    }
}

impl<V: Vocabulary> ScriptRunTokenizer<V> {
    pub const fn new(vocabulary: V) -> Self {
        Self { vocabulary }
    }

    fn kanji_run(&self, run: &[char], okurigana: &[char]) -> Token {
        let mut parts = self.segment(run, okurigana);
        if parts.len() == 1 {
            Token::Word(parts.remove(0))
        } else {
            Token::Compound(parts)
        }
    }

    fn segment(&self, run: &[char], okurigana: &[char]) -> Vec<String> {
        let mut parts = Vec::new();
        let mut unknown = String::new();
        let mut pos = 0;
        while pos < run.len() {
            if let Some((word, end)) = self.longest_word(run, pos, okurigana) {
                if !unknown.is_empty() {
                    parts.push(std::mem::take(&mut unknown));
                }
                parts.push(word);
                pos = end;
            } else {
                unknown.push(run[pos]);
                pos += 1;
            }
        }
        if !unknown.is_empty() {
            parts.push(unknown);
        }
        parts
    }

    /// The longest known word starting at `start`, and where it ends in
    /// `run`.
    fn longest_word(&self, run: &[char], start: usize, okurigana: &[char]) -> Option<(String, usize)> {
        (start + 1..=run.len()).rev().find_map(|end| {
            let stem: String = run[start..end].iter().collect();
            let word = if end == run.len() {
                self.with_okurigana(&stem, okurigana)
            } else {
                self.vocabulary.is_word(&stem).then_some(stem)
            };
            word.map(|word| (word, end))
        })
    }

    fn with_okurigana(&self, stem: &str, okurigana: &[char]) -> Option<String> {
        let okurigana = &okurigana[..okurigana.len().min(MAX_OKURIGANA)];
        (0..=okurigana.len()).rev().find_map(|len| {
            let base: String = stem.chars().chain(okurigana[..len].iter().copied()).collect();
            if self.vocabulary.is_word(&base) {
                return Some(base);
            }
            if okurigana.is_empty() {
                return None;
            }
            DICTIONARY_ENDINGS
                .iter()
                .map(|ending| format!("{base}{ending}"))
                .find(|word| self.vocabulary.is_word(word))
        })
    }
}

impl<V: Vocabulary> Tokenizer for ScriptRunTokenizer<V> {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let Some(run) = run_of(chars[start]) else {
                start += 1;
                continue;
            };
            let end = chars[start..]
                .iter()
                .position(|&c| run_of(c) != Some(run))
                .map_or(chars.len(), |len| start + len);

            match run {
                Run::Katakana => tokens.push(Token::Word(chars[start..end].iter().collect())),
                Run::Kanji => {
                    let okurigana = chars[end..].iter().take_while(|&&c| is_hiragana(c)).count();
                    tokens.push(self.kanji_run(&chars[start..end], &chars[end..end + okurigana]));
                }
            }
            start = end;
        }
        tokens
    }
}

// ---------------------------------------------------------------------------
// WordListTokenizer
// ---------------------------------------------------------------------------

/// One word per whitespace-separated token. `形態素+解析+器` is the compound
/// of the three fragments; empty fragments are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordListTokenizer;

impl Tokenizer for WordListTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .filter_map(|word| {
                if !word.contains('+') {
                    return Some(Token::Word(word.to_string()));
                }
                let fragments: Vec<String> = word
                    .split('+')
                    .filter(|fragment| !fragment.is_empty())
                    .map(str::to_string)
                    .collect();
                match fragments.len() {
                    0 => None,
                    1 => fragments.into_iter().next().map(Token::Word),
                    _ => Some(Token::Compound(fragments)),
                }
            })
            .collect()
    }
}
