//! Character-class helpers for Japanese script.
//!
//! Only kana are treated specially: hiragana and katakana carry no
//! compositional structure, everything else is a candidate for decomposition.

/// `true` for chars in the Hiragana block (U+3040–U+309F).
#[must_use]
pub const fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}')
}

/// `true` for chars in the Katakana block (U+30A0–U+30FF).
#[must_use]
pub const fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}')
}

#[must_use]
pub const fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// `true` when every char of `text` is kana. The empty string counts as
/// all-kana: it has nothing to decompose either.
#[must_use]
pub fn is_all_kana(text: &str) -> bool {
    text.chars().all(is_kana)
}

/// `true` when `text` contains at least one char worth decomposing.
#[must_use]
pub fn has_decomposable(text: &str) -> bool {
    !is_all_kana(text)
}

/// `true` for CJK unified ideographs (including extension A and the
/// compatibility block) and the iteration mark `々`.
#[must_use]
pub const fn is_ideograph(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' | '々'
    )
}
