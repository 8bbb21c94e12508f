//! Language registry: Single source of truth for the two display languages.
//!
//! The registry is initialized once via `OnceLock` and is immutable afterwards.
//! It carries the metadata the resolver and the HTTP layer need: the code
//! emitted in headers, human-readable names, and the aliases accepted from
//! query strings.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code ("en" or "ne")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Nepali")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "नेपाली")
    pub native_name: &'static str,

    /// Whether this is the fallback language (only one should be true)
    pub is_canonical: bool,

    /// Lowercase spellings accepted from `lang`/`language` query parameters
    pub aliases: &'static [&'static str],
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Find a language by code or alias, ignoring ASCII case and surrounding whitespace.
    pub fn find(&self, code_or_alias: &str) -> Option<&LanguageConfig> {
        let needle = code_or_alias.trim().to_ascii_lowercase();
        self.languages
            .iter()
            .find(|lang| lang.code == needle || lang.aliases.contains(&needle.as_str()))
    }

    /// Get all languages.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the canonical (fallback) language configuration.
    ///
    /// # Panics
    /// Panics if zero or several canonical languages are defined, which is
    /// a programming error in `default_languages`.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// English is canonical: it is the fallback whenever Nepali text is missing.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            aliases: &["english"],
        },
        LanguageConfig {
            code: "ne",
            name: "Nepali",
            native_name: "नेपाली",
            is_canonical: false,
            aliases: &["nepali"],
        },
    ]
}
