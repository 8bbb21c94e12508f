//! Recursive localization of schema-less values.
//!
//! A record field `k` pairs with a sibling `k` + suffix, where the suffix is
//! one of [`SECONDARY_SUFFIXES`]. Each pair collapses into a single field
//! under `k`; every other field is localized recursively and kept under its
//! own key.
//!
//! Suffix precedence is `Nepali`, then `_nepali`, then `_ne`. When a
//! primary has more than one secondary sibling, the first in precedence
//! order is merged, the rest are dropped from the output, and the collision
//! is logged and counted. A suffixed key whose primary does not exist is an
//! ordinary field and passes through under its own name.

use crate::compose::{compose, compose_object, select};
use crate::config::Config;
use crate::error::{LocalizeError, Result};
use crate::i18n::sanitize::sanitize;
use crate::i18n::{DisplayMode, Language, LocalizationMetrics, PairValidator};
use crate::value::{Node, NodeId, ValueGraph};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, warn};

/// Secondary-key suffixes, highest precedence first.
pub const SECONDARY_SUFFIXES: [&str; 3] = ["Nepali", "_nepali", "_ne"];

/// Settings for a localization pass.
#[derive(Debug, Clone)]
pub struct LocalizeOptions {
    /// Rendering of pairs where both languages are present
    pub mode: DisplayMode,
    /// Run composed text through the sanitizer (off unless asked for)
    pub sanitize: bool,
    /// Log quality warnings for every merged text pair
    pub validate_pairs: bool,
    /// Maximum container nesting before the pass is aborted
    pub max_depth: usize,
    /// Collapse records whose keys are exactly `en` and `ne` (off unless
    /// asked for; such records are otherwise ordinary data)
    pub collapse_language_maps: bool,
}

impl LocalizeOptions {
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn with_validate_pairs(mut self, validate_pairs: bool) -> Self {
        self.validate_pairs = validate_pairs;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_collapse_language_maps(mut self, collapse: bool) -> Self {
        self.collapse_language_maps = collapse;
        self
    }
}

impl Default for LocalizeOptions {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Single,
            sanitize: false,
            validate_pairs: false,
            max_depth: 256,
            collapse_language_maps: false,
        }
    }
}

impl From<&Config> for LocalizeOptions {
    fn from(config: &Config) -> Self {
        Self {
            mode: config.display_mode,
            sanitize: config.sanitize_text,
            validate_pairs: config.validate_pairs,
            max_depth: config.max_depth,
            collapse_language_maps: config.collapse_language_maps,
        }
    }
}

/// Localize a JSON value with default options and the given mode.
pub fn localize(value: &Value, language: Language, mode: DisplayMode) -> Result<Value> {
    Localizer::new(LocalizeOptions::default().with_mode(mode)).localize(value, language)
}

/// Applies a fixed set of options to any number of values.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    options: LocalizeOptions,
}

impl Localizer {
    pub fn new(options: LocalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LocalizeOptions {
        &self.options
    }

    /// Localize a decoded JSON value. The input is left untouched.
    pub fn localize(&self, value: &Value, language: Language) -> Result<Value> {
        let (graph, root) = ValueGraph::from_json(value);
        self.localize_graph(&graph, root, language)
    }

    /// Localize the value rooted at `root`.
    ///
    /// Fails with [`LocalizeError::CycleDetected`] if a node is reachable
    /// from itself. Nodes shared between unrelated branches are fine and
    /// are emitted once per occurrence.
    pub fn localize_graph(
        &self,
        graph: &ValueGraph,
        root: NodeId,
        language: Language,
    ) -> Result<Value> {
        LocalizationMetrics::global().record_localize_call();
        debug!(
            language = %language,
            mode = %self.options.mode,
            nodes = graph.len(),
            "Localizing value"
        );

        Walk::new(graph, language, &self.options).visit(root)
    }

    /// Merge one stored primary/secondary pair by shape, exactly as a pair
    /// found inside a record would be merged.
    pub fn localize_pair(
        &self,
        primary: Option<&Value>,
        secondary: Option<&Value>,
        language: Language,
    ) -> Result<Value> {
        let mut graph = ValueGraph::new();
        let primary = primary.map(|value| graph.insert_json(value));
        let secondary = secondary.map(|value| graph.insert_json(value));
        Walk::new(&graph, language, &self.options).merge(primary, secondary)
    }
}

/// Compose one text pair, with the pass's validation and sanitizing applied.
///
/// `path` only labels validation warnings.
pub(crate) fn compose_pair(
    options: &LocalizeOptions,
    en: Option<&str>,
    ne: Option<&str>,
    language: Language,
    path: &str,
) -> String {
    if options.validate_pairs {
        if let (Some(en), Some(ne)) = (en, ne) {
            for warning in PairValidator::validate(en, ne).warnings {
                warn!(path = %path, "{}", warning);
            }
        }
    }

    let text = compose(en, ne, language, options.mode);
    if options.sanitize {
        sanitize(&text)
    } else {
        text
    }
}

/// Shape of one side of a pair.
enum Side<'a> {
    Missing,
    Text(&'a str),
    Sequence(NodeId, &'a [NodeId]),
    Other(NodeId),
}

impl Side<'_> {
    fn is_present(&self) -> bool {
        match self {
            Side::Missing => false,
            Side::Text(text) => !text.is_empty(),
            Side::Sequence(_, items) => !items.is_empty(),
            Side::Other(_) => true,
        }
    }

    fn is_text_like(&self) -> bool {
        matches!(self, Side::Missing | Side::Text(_))
    }

    fn is_sequence_like(&self) -> bool {
        matches!(self, Side::Missing | Side::Sequence(..))
    }

    fn text(&self) -> Option<&str> {
        match self {
            Side::Text(text) => Some(*text),
            _ => None,
        }
    }

    fn items(&self) -> &[NodeId] {
        match self {
            Side::Sequence(_, items) => *items,
            _ => &[],
        }
    }
}

/// Which fields of a record pair up.
struct PairPlan<'f> {
    /// primary key -> secondary node
    secondaries: HashMap<&'f str, NodeId>,
    /// every key merged into some primary
    consumed: HashSet<&'f str>,
}

fn plan_pairs<'f>(fields: &'f [(String, NodeId)]) -> PairPlan<'f> {
    let mut index: HashMap<&'f str, NodeId> = HashMap::with_capacity(fields.len());
    for (key, id) in fields {
        index.entry(key.as_str()).or_insert(*id);
    }

    let mut plan = PairPlan {
        secondaries: HashMap::new(),
        consumed: HashSet::new(),
    };

    for (key, _) in fields {
        let candidates: Vec<(&'f str, NodeId)> = SECONDARY_SUFFIXES
            .iter()
            .filter_map(|suffix| {
                let candidate = format!("{}{}", key, suffix);
                index
                    .get_key_value(candidate.as_str())
                    .map(|(name, id)| (*name, *id))
            })
            .collect();

        let Some(&(chosen_key, chosen_id)) = candidates.first() else {
            continue;
        };

        if candidates.len() > 1 {
            let ignored: Vec<&str> = candidates[1..].iter().map(|(name, _)| *name).collect();
            warn!(
                primary = %key,
                chosen = %chosen_key,
                ignored = ?ignored,
                "Ambiguous bilingual pairing, using highest-precedence suffix"
            );
            LocalizationMetrics::global().record_ambiguous_pairing();
        }

        plan.secondaries.insert(key.as_str(), chosen_id);
        plan.consumed.extend(candidates.iter().map(|(name, _)| *name));
    }

    plan
}

struct Walk<'a> {
    graph: &'a ValueGraph,
    language: Language,
    options: &'a LocalizeOptions,
    /// containers on the current path
    on_path: HashSet<NodeId>,
    /// keys/indices from the root, for error messages
    path: Vec<String>,
}

impl<'a> Walk<'a> {
    fn new(graph: &'a ValueGraph, language: Language, options: &'a LocalizeOptions) -> Self {
        Self {
            graph,
            language,
            options,
            on_path: HashSet::new(),
            path: Vec::new(),
        }
    }

    fn visit(&mut self, id: NodeId) -> Result<Value> {
        let graph = self.graph;
        match graph.get(id) {
            None => {
                debug!(path = %self.pointer(), "Dangling node id, emitting null");
                Ok(Value::Null)
            }
            Some(Node::Scalar(scalar)) => Ok(scalar.to_json()),
            Some(Node::Text(text)) => Ok(Value::String(text.clone())),
            Some(Node::Sequence(items)) => self.enter(&[id], |walk| {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(walk.descend(i.to_string(), |walk| walk.visit(*item))?);
                }
                Ok(Value::Array(out))
            }),
            Some(Node::Record(fields)) => self.enter(&[id], |walk| walk.record(fields)),
        }
    }

    fn record(&mut self, fields: &'a [(String, NodeId)]) -> Result<Value> {
        let plan = plan_pairs(fields);
        let mut out = Map::with_capacity(fields.len());

        for (key, id) in fields {
            if plan.consumed.contains(key.as_str()) {
                continue;
            }

            let value = match plan.secondaries.get(key.as_str()) {
                Some(secondary) => {
                    LocalizationMetrics::global().record_pair_merged();
                    self.descend(key.clone(), |walk| walk.merge(Some(*id), Some(*secondary)))?
                }
                None => self.descend(key.clone(), |walk| walk.visit(*id))?,
            };
            out.insert(key.clone(), value);
        }

        if self.options.collapse_language_maps && is_language_map(&out) {
            return Ok(compose_object(&out, self.language)
                .cloned()
                .unwrap_or(Value::Null));
        }

        Ok(Value::Object(out))
    }

    /// Merge a primary and a secondary node according to their shapes.
    fn merge(&mut self, primary: Option<NodeId>, secondary: Option<NodeId>) -> Result<Value> {
        let primary = self.side(primary);
        let secondary = self.side(secondary);

        if primary.is_text_like() && secondary.is_text_like() {
            return Ok(self.merge_text(primary.text(), secondary.text()));
        }

        if primary.is_sequence_like() && secondary.is_sequence_like() {
            let containers: Vec<NodeId> = [&primary, &secondary]
                .iter()
                .filter_map(|side| match side {
                    Side::Sequence(id, _) => Some(*id),
                    _ => None,
                })
                .collect();
            let (en_items, ne_items) = (primary.items(), secondary.items());

            return self.enter(&containers, |walk| {
                let len = en_items.len().max(ne_items.len());
                let mut out = Vec::with_capacity(len);
                for i in 0..len {
                    let (en, ne) = (en_items.get(i).copied(), ne_items.get(i).copied());
                    out.push(walk.descend(i.to_string(), |walk| walk.merge(en, ne))?);
                }
                Ok(Value::Array(out))
            });
        }

        let present = |side: Side<'a>| side.is_present().then_some(side);
        match select(present(primary), present(secondary), self.language) {
            Some(Side::Text(text)) => Ok(Value::String(text.to_string())),
            Some(Side::Sequence(id, _)) | Some(Side::Other(id)) => self.visit(id),
            Some(Side::Missing) | None => Ok(Value::Null),
        }
    }

    fn merge_text(&self, en: Option<&str>, ne: Option<&str>) -> Value {
        if en.is_none() && ne.is_none() {
            return Value::Null;
        }

        Value::String(compose_pair(
            self.options,
            en,
            ne,
            self.language,
            &self.pointer(),
        ))
    }

    fn side(&self, id: Option<NodeId>) -> Side<'a> {
        let graph = self.graph;
        match id.map(|id| (id, graph.get(id))) {
            None | Some((_, None)) => Side::Missing,
            Some((_, Some(node))) if node.is_null() => Side::Missing,
            Some((_, Some(Node::Text(text)))) => Side::Text(text),
            Some((id, Some(Node::Sequence(items)))) => Side::Sequence(id, items),
            Some((id, Some(_))) => Side::Other(id),
        }
    }

    /// Run `f` with `ids` marked as being on the current path.
    fn enter<T>(&mut self, ids: &[NodeId], f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        for id in ids {
            if self.on_path.contains(id) {
                let path = self.pointer();
                error!(path = %path, "Cycle detected while localizing");
                LocalizationMetrics::global().record_cycle_detected();
                return Err(LocalizeError::CycleDetected { path });
            }
        }

        if self.on_path.len() + ids.len() > self.options.max_depth {
            return Err(LocalizeError::DepthExceeded {
                limit: self.options.max_depth,
                path: self.pointer(),
            });
        }

        self.on_path.extend(ids.iter().copied());
        let result = f(self);
        for id in ids {
            self.on_path.remove(id);
        }
        result
    }

    fn descend<T>(&mut self, segment: String, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    /// JSON-pointer-style rendering of the current path.
    fn pointer(&self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.path.join("/"))
        }
    }
}

fn is_language_map(map: &Map<String, Value>) -> bool {
    map.len() == 2
        && map.contains_key(Language::En.code())
        && map.contains_key(Language::Ne.code())
}
