//! Numeric document identifiers minted by the identifier allocator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the document key that carries the identifier.
pub const ID_FIELD: &str = "_id";

/// Unique, monotonically increasing identifier of a [`Document`](crate::document::Document)
/// within its collection.
///
/// Values are never reused, even after the document is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Wrap a raw sequence value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the inner sequence value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DocumentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
