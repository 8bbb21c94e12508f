//! Script detection for English/Nepali text.

use serde::Serialize;

/// Script content of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    English,
    Nepali,
    Mixed,
}

/// Devanagari Unicode block.
const DEVANAGARI: std::ops::RangeInclusive<char> = '\u{0900}'..='\u{097F}';

/// Whether the text contains at least one Devanagari code point.
pub fn has_devanagari(text: &str) -> bool {
    text.chars().any(|c| DEVANAGARI.contains(&c))
}

/// Whether the text contains at least one ASCII letter.
pub fn has_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Classify a string by the scripts it contains.
///
/// Empty text, and text with neither script (digits, punctuation), is English.
pub fn classify(text: &str) -> Script {
    match (has_latin(text), has_devanagari(text)) {
        (true, true) => Script::Mixed,
        (false, true) => Script::Nepali,
        _ => Script::English,
    }
}
