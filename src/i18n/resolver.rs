//! Effective display language for a request.
//!
//! Query values match exactly; the `Accept-Language` header matches by
//! substring. `q=` weights are ignored.

use crate::i18n::Language;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE};
use axum::http::{HeaderMap, HeaderValue};
use std::collections::HashMap;

/// Query parameter names that carry a language choice.
pub const LANGUAGE_QUERY_PARAMS: [&str; 2] = ["lang", "language"];

/// Resolve the display language from query parameters and headers.
///
/// First match wins:
/// 1. `lang` or `language` equal to `"ne"` or `"nepali"` selects Nepali.
/// 2. `Accept-Language` containing `"ne"` or `"nepali"` selects Nepali.
/// 3. Otherwise English.
pub fn resolve(query: &HashMap<String, String>, headers: &HeaderMap) -> Language {
    let from_query = LANGUAGE_QUERY_PARAMS
        .iter()
        .filter_map(|name| query.get(*name))
        .any(|value| is_nepali_token(value));
    if from_query {
        return Language::Ne;
    }

    let from_header = headers
        .get_all(ACCEPT_LANGUAGE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(mentions_nepali);
    if from_header {
        return Language::Ne;
    }

    Language::En
}

fn is_nepali_token(value: &str) -> bool {
    let ne = Language::Ne.config();
    value == ne.code || ne.aliases.contains(&value)
}

fn mentions_nepali(header: &str) -> bool {
    let ne = Language::Ne.config();
    header.contains(ne.code) || ne.aliases.iter().any(|alias| header.contains(alias))
}

/// Headers that re-attach a resolved language on a downstream call.
pub fn headers_for(language: Language) -> HeaderMap {
    let value = HeaderValue::from_static(language.code());
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, value.clone());
    headers.insert(CONTENT_LANGUAGE, value);
    headers
}

/// Query parameters that re-attach a resolved language on a downstream call.
pub fn query_for(language: Language) -> HashMap<String, String> {
    HashMap::from([("lang".to_string(), language.code().to_string())])
}
