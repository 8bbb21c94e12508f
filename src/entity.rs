//! Field-pair tables for known entity types.
//!
//! Known entities do not go through suffix discovery: each kind lists its
//! bilingual fields explicitly, so a stray `_ne` key can never be mistaken
//! for a translation. Fields not in the table are copied as they are.

use crate::error::{LocalizeError, Result};
use crate::i18n::{Language, LocalizationMetrics};
use crate::transform::{compose_pair, LocalizeOptions, Localizer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One bilingual field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPair {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub is_array: bool,
}

const fn text(primary: &'static str, secondary: &'static str) -> FieldPair {
    FieldPair {
        primary,
        secondary,
        is_array: false,
    }
}

const fn array(primary: &'static str, secondary: &'static str) -> FieldPair {
    FieldPair {
        primary,
        secondary,
        is_array: true,
    }
}

const POLITICIAN: &[FieldPair] = &[
    text("name", "nameNepali"),
    text("position", "positionNepali"),
    text("biography", "biographyNepali"),
    text("education", "educationNepali"),
    text("partyName", "partyNameNepali"),
    array("achievements", "achievementsNepali"),
];

const REPORT: &[FieldPair] = &[
    text("title", "titleNepali"),
    text("description", "descriptionNepali"),
    text("location", "locationNepali"),
    array("tags", "tagsNepali"),
];

const POLL: &[FieldPair] = &[
    text("title", "titleNepali"),
    text("description", "descriptionNepali"),
    text("question", "questionNepali"),
    array("options", "optionsNepali"),
];

const PROVINCE: &[FieldPair] = &[
    text("name", "nameNepali"),
    text("capital", "capitalNepali"),
    text("description", "descriptionNepali"),
];

const DISTRICT: &[FieldPair] = &[
    text("name", "nameNepali"),
    text("headquarters", "headquartersNepali"),
    text("description", "descriptionNepali"),
];

const PARTY: &[FieldPair] = &[
    text("name", "nameNepali"),
    text("abbreviation", "abbreviationNepali"),
    text("ideology", "ideologyNepali"),
    text("description", "descriptionNepali"),
    array("principles", "principlesNepali"),
];

const CANDIDATE: &[FieldPair] = &[
    text("name", "nameNepali"),
    text("biography", "biographyNepali"),
    text("constituency", "constituencyNepali"),
    array("manifesto", "manifestoNepali"),
];

/// Entity types with a fixed field-pair table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Politician,
    Report,
    Poll,
    Province,
    District,
    Party,
    Candidate,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Politician,
        EntityKind::Report,
        EntityKind::Poll,
        EntityKind::Province,
        EntityKind::District,
        EntityKind::Party,
        EntityKind::Candidate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Politician => "politician",
            EntityKind::Report => "report",
            EntityKind::Poll => "poll",
            EntityKind::Province => "province",
            EntityKind::District => "district",
            EntityKind::Party => "party",
            EntityKind::Candidate => "candidate",
        }
    }

    pub fn fields(&self) -> &'static [FieldPair] {
        match self {
            EntityKind::Politician => POLITICIAN,
            EntityKind::Report => REPORT,
            EntityKind::Poll => POLL,
            EntityKind::Province => PROVINCE,
            EntityKind::District => DISTRICT,
            EntityKind::Party => PARTY,
            EntityKind::Candidate => CANDIDATE,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = LocalizeError;

    /// Accepts the singular name or its plural ("politicians", "parties").
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| name == kind.as_str() || name == plural(kind.as_str()))
            .ok_or_else(|| LocalizeError::UnknownEntity(s.to_string()))
    }
}

fn plural(name: &str) -> String {
    match name.strip_suffix('y') {
        Some(stem) => format!("{}ies", stem),
        None => format!("{}s", name),
    }
}

/// Localize one entity record, or every record of an array.
///
/// Table fields collapse into the primary key (in its original position,
/// or appended if only the secondary existed) and the secondary key is
/// dropped. A pair whose values do not have the table's shape is merged by
/// [`Localizer::localize_pair`], the same way suffix discovery merges it.
/// Values that are not records are returned unchanged.
pub fn localize_entity(
    value: &Value,
    kind: EntityKind,
    language: Language,
    options: &LocalizeOptions,
) -> Result<Value> {
    LocalizationMetrics::global().record_localize_call();
    debug!(entity = %kind, language = %language, mode = %options.mode, "Localizing entity");

    localize_value(value, kind, language, &Localizer::new(options.clone()))
}

fn localize_value(
    value: &Value,
    kind: EntityKind,
    language: Language,
    localizer: &Localizer,
) -> Result<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| localize_value(item, kind, language, localizer))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(record) => localize_record(record, kind, language, localizer).map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn localize_record(
    record: &Map<String, Value>,
    kind: EntityKind,
    language: Language,
    localizer: &Localizer,
) -> Result<Map<String, Value>> {
    let options = localizer.options();
    let mut composed: Vec<(&'static str, Value)> = Vec::new();
    for pair in kind.fields() {
        let primary = record.get(pair.primary);
        let secondary = record.get(pair.secondary);
        if primary.is_none() && secondary.is_none() {
            continue;
        }

        let path = format!("/{}", pair.primary);
        let tabled = if pair.is_array {
            as_text_items(primary)
                .zip(as_text_items(secondary))
                .map(|(en, ne)| {
                    let len = en.len().max(ne.len());
                    Value::Array(
                        (0..len)
                            .map(|i| {
                                let path = format!("{}/{}", path, i);
                                let (en, ne) = (en.get(i).copied(), ne.get(i).copied());
                                Value::String(compose_pair(options, en, ne, language, &path))
                            })
                            .collect(),
                    )
                })
        } else {
            as_text(primary)
                .zip(as_text(secondary))
                .map(|(en, ne)| Value::String(compose_pair(options, en, ne, language, &path)))
        };

        let value = match tabled {
            Some(value) => value,
            None => localizer.localize_pair(primary, secondary, language)?,
        };

        LocalizationMetrics::global().record_pair_merged();
        composed.push((pair.primary, value));
    }

    let secondaries: Vec<&str> = kind.fields().iter().map(|pair| pair.secondary).collect();
    let mut out = Map::with_capacity(record.len());
    for (key, value) in record {
        if secondaries.contains(&key.as_str()) {
            continue;
        }
        let replacement = composed
            .iter()
            .find(|(primary, _)| *primary == key.as_str())
            .map(|(_, value)| value.clone());
        out.insert(key.clone(), replacement.unwrap_or_else(|| value.clone()));
    }
    for (primary, value) in composed {
        if !out.contains_key(primary) {
            out.insert(primary.to_string(), value);
        }
    }
    Ok(out)
}

/// A text field side: absent or a string. Anything else is not text.
fn as_text(value: Option<&Value>) -> Option<Option<&str>> {
    match value {
        None => Some(None),
        Some(Value::String(text)) => Some(Some(text.as_str())),
        Some(_) => None,
    }
}

/// An array field side: absent or an array of strings only.
fn as_text_items(value: Option<&Value>) -> Option<Vec<&str>> {
    match value {
        None => Some(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(Value::as_str).collect(),
        Some(_) => None,
    }
}
