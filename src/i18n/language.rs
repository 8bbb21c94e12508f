//! Display language and display mode.
//!
//! `Language` is a closed two-variant enum. Callers thread a resolved value
//! explicitly through every localization call; nothing in this crate takes a
//! defaulted language parameter.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ne,
}

impl Language {
    /// Create a Language from a code or alias ("en", "english", "ne", "nepali").
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().find(code) {
            Some(config) => Ok(Self::from_config(config)),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The fallback language used when the requested text is missing.
    pub fn canonical() -> Language {
        Self::from_config(LanguageRegistry::get().canonical())
    }

    /// ISO 639-1 code, as sent in `Content-Language`.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ne => "ne",
        }
    }

    /// The other language of the pair.
    pub fn other(&self) -> Language {
        match self {
            Language::En => Language::Ne,
            Language::Ne => Language::En,
        }
    }

    /// Full configuration from the registry.
    ///
    /// # Panics
    /// Panics if the registry lacks an entry for this variant, which cannot
    /// happen with the built-in registry.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code())
            .expect("Language code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }

    fn from_config(config: &LanguageConfig) -> Language {
        if config.code == "ne" {
            Language::Ne
        } else {
            Language::En
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}

/// How a resolved pair is rendered.
///
/// `Single` returns one language's text. `Combined` returns the requested
/// language's text followed by the other language's text in parentheses,
/// when both exist and differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Single,
    Combined,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Single => "single",
            DisplayMode::Combined => "combined",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = anyhow::Error;

    /// Accepts "single" and "combined", plus "both" as a synonym for combined.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(DisplayMode::Single),
            "combined" | "both" => Ok(DisplayMode::Combined),
            other => bail!("Unknown display mode: '{}'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_codes_and_aliases() {
        assert_eq!(Language::from_code("en").unwrap(), Language::En);
        assert_eq!(Language::from_code("ne").unwrap(), Language::Ne);
        assert_eq!(Language::from_code("Nepali").unwrap(), Language::Ne);
        assert_eq!(Language::from_code("english").unwrap(), Language::En);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== Metadata Tests ====================

    #[test]
    fn test_canonical_is_english() {
        assert_eq!(Language::canonical(), Language::En);
        assert_eq!(Language::default(), Language::En);
        assert!(Language::En.is_canonical());
        assert!(!Language::Ne.is_canonical());
    }

    #[test]
    fn test_other_swaps() {
        assert_eq!(Language::En.other(), Language::Ne);
        assert_eq!(Language::Ne.other(), Language::En);
    }

    #[test]
    fn test_names() {
        assert_eq!(Language::Ne.name(), "Nepali");
        assert_eq!(Language::Ne.native_name(), "नेपाली");
        assert_eq!(Language::En.to_string(), "en");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Ne).unwrap(), "\"ne\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }

    // ==================== DisplayMode Tests ====================

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("single".parse::<DisplayMode>().unwrap(), DisplayMode::Single);
        assert_eq!("Combined".parse::<DisplayMode>().unwrap(), DisplayMode::Combined);
        assert_eq!("both".parse::<DisplayMode>().unwrap(), DisplayMode::Combined);
        assert!("dual".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_display_mode_default_is_single() {
        assert_eq!(DisplayMode::default(), DisplayMode::Single);
        assert_eq!(
            serde_json::to_string(&DisplayMode::Combined).unwrap(),
            "\"combined\""
        );
    }
}
