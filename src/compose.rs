//! Pairwise merging of English/Nepali text.
//!
//! Everything here is a pure function of its arguments. The recursive
//! transformer and the entity tables both funnel every text pair through
//! [`compose`], so the fallback rules live in exactly one place.

use crate::i18n::{DisplayMode, Language};
use serde::{Deserialize, Serialize};

/// Merge a primary (English) and secondary (Nepali) text.
///
/// When both sides are present and differ:
/// - `Combined` renders `"requested (other)"`
/// - `Single` renders the requested side
///
/// Otherwise the requested side wins if present, then the other side, then
/// the empty string. Empty text counts as absent; whitespace is text.
pub fn compose(
    primary: Option<&str>,
    secondary: Option<&str>,
    language: Language,
    mode: DisplayMode,
) -> String {
    let primary = primary.filter(|text| !text.is_empty());
    let secondary = secondary.filter(|text| !text.is_empty());

    match (primary, secondary) {
        (Some(en), Some(ne)) if en != ne => match (mode, language) {
            (DisplayMode::Combined, Language::En) => format!("{} ({})", en, ne),
            (DisplayMode::Combined, Language::Ne) => format!("{} ({})", ne, en),
            (DisplayMode::Single, Language::En) => en.to_string(),
            (DisplayMode::Single, Language::Ne) => ne.to_string(),
        },
        (en, ne) => select(en, ne, language).unwrap_or_default().to_string(),
    }
}

/// Merge two text sequences index by index.
///
/// The result has the length of the longer input. Past the end of the
/// shorter one, each element falls back to whichever side exists, so a
/// missing sequence yields the other one unmerged.
pub fn compose_array<S: AsRef<str>>(
    primary: Option<&[S]>,
    secondary: Option<&[S]>,
    language: Language,
    mode: DisplayMode,
) -> Vec<String> {
    let primary = primary.unwrap_or_default();
    let secondary = secondary.unwrap_or_default();
    let len = primary.len().max(secondary.len());

    (0..len)
        .map(|i| {
            compose(
                primary.get(i).map(|item| item.as_ref()),
                secondary.get(i).map(|item| item.as_ref()),
                language,
                mode,
            )
        })
        .collect()
}

/// Select from a map keyed directly by language code (`{"en": .., "ne": ..}`).
///
/// The requested key wins when present and non-null; otherwise English,
/// then Nepali.
pub fn compose_object(
    map: &serde_json::Map<String, serde_json::Value>,
    language: Language,
) -> Option<&serde_json::Value> {
    let get = |lang: Language| map.get(lang.code()).filter(|value| !value.is_null());
    select(get(Language::En), get(Language::Ne), language)
}

/// Pick the requested language's value, falling back to the other one.
pub fn select<T>(en: Option<T>, ne: Option<T>, language: Language) -> Option<T> {
    match language {
        Language::En => en.or(ne),
        Language::Ne => ne.or(en),
    }
}

/// Text carried in both languages, as built by code that constructs
/// bilingual content rather than merging stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub en: String,
    pub ne: String,
}

impl BilingualText {
    /// Build a pair; Nepali falls back to the English text when not provided.
    pub fn new(en: impl Into<String>, ne: Option<String>) -> Self {
        let en = en.into();
        let ne = ne
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| en.clone());
        Self { en, ne }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ne => &self.ne,
        }
    }

    pub fn compose(&self, language: Language, mode: DisplayMode) -> String {
        compose(Some(self.en.as_str()), Some(self.ne.as_str()), language, mode)
    }

    /// Split a `Combined` rendering back into its two sides.
    ///
    /// `language` must be the language the text was composed for. The
    /// trailing parenthesised group is matched by balance, so either side
    /// may itself contain parentheses as long as the inner side's are
    /// balanced. Text without a trailing group is treated as identical in
    /// both languages.
    pub fn decompose(text: &str, language: Language) -> Self {
        let Some((outer, inner)) = split_trailing_group(text) else {
            return Self {
                en: text.to_string(),
                ne: text.to_string(),
            };
        };

        let (en, ne) = match language {
            Language::En => (outer, inner),
            Language::Ne => (inner, outer),
        };
        Self {
            en: en.to_string(),
            ne: ne.to_string(),
        }
    }
}

/// Split `"outer (inner)"` at the group that closes the string.
fn split_trailing_group(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_suffix(')')?;

    let mut depth = 1usize;
    for (idx, c) in body.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    let outer = body[..idx].strip_suffix(' ')?;
                    let inner = &body[idx + 1..];
                    if outer.is_empty() || inner.is_empty() {
                        return None;
                    }
                    return Some((outer, inner));
                }
            }
            _ => {}
        }
    }
    None
}

/// Text sequences carried in both languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualArray {
    pub en: Vec<String>,
    pub ne: Vec<String>,
}

impl BilingualArray {
    /// Build a pair; Nepali falls back to the English items when not provided.
    pub fn new(en: Vec<String>, ne: Option<Vec<String>>) -> Self {
        let ne = ne
            .filter(|items| !items.is_empty())
            .unwrap_or_else(|| en.clone());
        Self { en, ne }
    }

    pub fn get(&self, language: Language) -> &[String] {
        match language {
            Language::En => &self.en,
            Language::Ne => &self.ne,
        }
    }

    pub fn compose(&self, language: Language, mode: DisplayMode) -> Vec<String> {
        compose_array(Some(self.en.as_slice()), Some(self.ne.as_slice()), language, mode)
    }
}
