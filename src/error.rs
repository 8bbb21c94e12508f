use thiserror::Error;

/// Failures that abort a localization.
///
/// Ambiguous pairings are not errors: they are resolved by suffix
/// precedence and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizeError {
    /// A node was reached again while still being visited.
    #[error("cycle detected at {path}")]
    CycleDetected { path: String },

    /// Nesting exceeded the configured depth guard.
    #[error("nesting deeper than {limit} levels at {path}")]
    DepthExceeded { limit: usize, path: String },

    #[error("unknown entity kind: '{0}'")]
    UnknownEntity(String),
}

pub type Result<T> = std::result::Result<T, LocalizeError>;
