//! Free-form text normalization before it is echoed back to clients.
//!
//! This is not an HTML sanitizer: it only strips the angle brackets that
//! would open or close a tag.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum length of sanitized text, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Sanitize text with the default length bound.
pub fn sanitize(text: &str) -> String {
    sanitize_with_limit(text, MAX_TEXT_CHARS)
}

/// Strip `<`/`>`, trim, collapse whitespace runs to one space, and truncate
/// to `max_chars` characters.
///
/// Brackets are removed before whitespace is handled. The output is a fixed
/// point of this function.
pub fn sanitize_with_limit(text: &str, max_chars: usize) -> String {
    let regex = WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap());

    let stripped: String = text.chars().filter(|c| *c != '<' && *c != '>').collect();
    let collapsed = regex.replace_all(stripped.trim(), " ");

    match collapsed.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => collapsed[..byte_idx].trim_end().to_string(),
        None => collapsed.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(sanitize("  hello \n\t world  "), "hello world");
    }

    #[test]
    fn test_removes_angle_brackets() {
        assert_eq!(sanitize("<script>alert(1)</script>"), "scriptalert(1)/script");
    }

    #[test]
    fn test_bracket_between_spaces_does_not_leave_double_space() {
        assert_eq!(sanitize("a < b"), "a b");
        assert_eq!(sanitize("< a >"), "a");
    }

    #[test]
    fn test_truncates_by_characters_not_bytes() {
        let long = "क".repeat(1500);
        let result = sanitize(&long);
        assert_eq!(result.chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_truncation_does_not_end_in_space() {
        let text = format!("{} b", "a".repeat(3));
        assert_eq!(sanitize_with_limit(&text, 4), "aaa");
    }

    #[test]
    fn test_idempotent_on_samples() {
        let samples = [
            "  plain  ",
            "<b>bold</b>  text",
            "नमस्ते   संसार",
            "x < y > z",
            "",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(sanitize("   "), "");
    }
}
