//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`RecordHubError`]
//! via `#[from]` or an explicit `From` impl.

use std::fmt;

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum RecordHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A request was rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were absent on create.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// The caller tried to overwrite a field that is assigned by the store.
    #[error("field `{field}` cannot be modified")]
    ImmutableField { field: &'static str },

    /// The request body could not be interpreted as a document.
    #[error("invalid request body: {reason}")]
    InvalidBody { reason: String },
}

/// No document matched the requested identifier or filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {key}")]
pub struct NotFoundError {
    /// Human readable entity label, e.g. `Car`.
    pub entity: &'static str,
    /// What was looked up: an identifier or a filter description.
    pub key: LookupKey,
}

/// The key a failed lookup was made with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(i64),
    Filter(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Filter(filter) if filter.is_empty() => f.write_str("empty collection"),
            Self::Filter(filter) => write!(f, "filter {filter}"),
        }
    }
}
