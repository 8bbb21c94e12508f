//! Bilingual (English/Nepali) content resolution.
//!
//! Domain records carry paired fields such as `title` / `titleNepali`.
//! This crate turns such records into a single-language representation, or a
//! combined `"requested (other)"` rendering, for one request at a time.
//!
//! ```rust,ignore
//! use bilingual_content::{localize, DisplayMode, Language};
//!
//! let data = localize(&record, Language::Ne, DisplayMode::Single)?;
//! ```

pub mod compose;
pub mod config;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod i18n;
pub mod server;
pub mod transform;
pub mod value;

pub use compose::{compose, compose_array, compose_object, BilingualArray, BilingualText};
pub use entity::{localize_entity, EntityKind, FieldPair};
pub use envelope::ApiResponse;
pub use error::LocalizeError;
pub use i18n::{DisplayMode, Language};
pub use transform::{localize, LocalizeOptions, Localizer};
pub use value::{Node, NodeId, Scalar, ValueGraph};
