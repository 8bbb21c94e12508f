//! Quality checks for an English/Nepali text pair.
//!
//! Findings never change localized output. They are logged so stored
//! content can be cleaned up: a Nepali field holding English text, a link
//! present on only one side, and so on.

use crate::i18n::script::{classify, has_devanagari, Script};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors that indicate the pair is unusable
    pub errors: Vec<String>,

    /// Non-critical warnings about likely data-entry mistakes
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for bilingual pairs.
pub struct PairValidator;

static HASHTAG_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl PairValidator {
    /// Validate a primary (English) / secondary (Nepali) text pair.
    ///
    /// Empty sides are skipped: a missing translation is a fallback case,
    /// not a quality problem.
    pub fn validate(primary: &str, secondary: &str) -> ValidationReport {
        let mut report = ValidationReport::new();
        let primary = primary.trim();
        let secondary = secondary.trim();

        if primary.is_empty() || secondary.is_empty() {
            return report;
        }

        if !has_devanagari(secondary) {
            report
                .warnings
                .push(format!("Nepali text contains no Devanagari: {:?}", secondary));
        }

        if classify(primary) == Script::Nepali {
            report
                .warnings
                .push(format!("English text is entirely Devanagari: {:?}", primary));
        }

        let primary_urls = Self::extract_urls(primary);
        let secondary_urls = Self::extract_urls(secondary);
        if primary_urls != secondary_urls {
            report.warnings.push(format!(
                "URL mismatch: English has {} URLs, Nepali has {} URLs",
                primary_urls.len(),
                secondary_urls.len()
            ));
        }

        let primary_tags = Self::extract_hashtags(primary);
        let secondary_tags = Self::extract_hashtags(secondary);
        if primary_tags != secondary_tags {
            report.warnings.push(format!(
                "Hashtag mismatch: English has {:?}, Nepali has {:?}",
                primary_tags, secondary_tags
            ));
        }

        report
    }

    /// Latin-script #hashtags; Devanagari tags are expected to differ.
    fn extract_hashtags(text: &str) -> Vec<String> {
        let regex = HASHTAG_REGEX.get_or_init(|| Regex::new(r"#([a-zA-Z0-9_]+)").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(0).map(|m| m.as_str().to_string()))
            .collect()
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Extraction Tests ====================

    #[test]
    fn test_extract_hashtags_ignores_devanagari_tags() {
        let tags = PairValidator::extract_hashtags("#Election2079 र #निर्वाचन");
        assert_eq!(tags, vec!["#Election2079"]);
    }

    #[test]
    fn test_extract_urls() {
        let urls = PairValidator::extract_urls("see https://election.gov.np (official)");
        assert_eq!(urls, vec!["https://election.gov.np"]);
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_clean_pair() {
        let report = PairValidator::validate(
            "Results at https://result.gov.np #Election",
            "नतिजा https://result.gov.np मा #Election",
        );
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_validate_english_in_nepali_field() {
        let report = PairValidator::validate("Kathmandu", "Kathmandu");
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("no Devanagari"));
    }

    #[test]
    fn test_validate_swapped_fields() {
        let report = PairValidator::validate("काठमाडौं", "Kathmandu");
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[1].contains("entirely Devanagari"));
    }

    #[test]
    fn test_validate_url_mismatch() {
        let report = PairValidator::validate("Read https://a.np", "पढ्नुहोस्");
        assert!(report.warnings.iter().any(|w| w.contains("URL mismatch")));
    }

    #[test]
    fn test_validate_skips_missing_side() {
        assert!(PairValidator::validate("Kathmandu", "").is_clean());
        assert!(PairValidator::validate("", "काठमाडौं").is_clean());
    }

    #[test]
    fn test_mixed_english_text_is_fine() {
        let report = PairValidator::validate("Nepali Congress (नेपाली कांग्रेस)", "नेपाली कांग्रेस");
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_report_flags() {
        let mut report = ValidationReport::new();
        assert!(report.is_clean());
        report.errors.push("broken".to_string());
        assert!(report.has_errors());
        assert!(!report.has_warnings());
        assert!(!report.is_clean());
    }
}
