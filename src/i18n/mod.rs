//! Language primitives for bilingual (English/Nepali) content.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the two supported languages
//! - `language`: `Language` and `DisplayMode`
//! - `resolver`: Effective language for a request from query and headers
//! - `script`: Devanagari/Latin script detection
//! - `sanitize`: Whitespace and markup normalization for echoed text
//! - `validator`: Quality checks for an English/Nepali pair
//! - `metrics`: Localization counters
//!
//! # Example
//!
//! ```rust,ignore
//! use bilingual_content::i18n::{resolver, Language};
//!
//! let language = resolver::resolve(&query, &headers);
//! let headers = resolver::headers_for(language);
//! ```

mod language;
mod metrics;
mod registry;
pub mod resolver;
pub mod sanitize;
pub mod script;
mod validator;

pub use language::{DisplayMode, Language};
pub use metrics::{LocalizationMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use script::Script;
pub use validator::{PairValidator, ValidationReport};
