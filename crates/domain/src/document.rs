//! Document — a schemaless record keyed by a [`DocumentId`].
//!
//! A document is a JSON object. The identifier lives under the `_id` key on
//! the wire and in storage; in memory it is kept apart from the remaining
//! fields so it cannot be overwritten by accident.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::id::{DocumentId, ID_FIELD};

/// Field name to value mapping, in insertion order of the JSON object.
pub type Fields = serde_json::Map<String, Value>;

/// A stored car or employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Attach `id` to `fields`. Any `_id` already present in `fields` is
    /// discarded in favour of the allocated one.
    #[must_use]
    pub fn new(id: DocumentId, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// Look up a top-level field. `_id` resolves to the identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if name == ID_FIELD {
            return Some(Value::from(self.id.value()));
        }
        self.fields.get(name).cloned()
    }

    /// Overwrite top-level fields with the given values.
    ///
    /// Fields not mentioned in `update` are preserved. Nested objects are
    /// replaced as a whole, not merged.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ImmutableField`] if `update` contains `_id`.
    pub fn merge(&mut self, update: Fields) -> Result<(), ValidationError> {
        ensure_no_id(&update)?;
        self.fields.extend(update);
        Ok(())
    }
}

/// Reject updates that would reassign the identifier.
///
/// # Errors
///
/// Returns [`ValidationError::ImmutableField`] if `fields` contains `_id`.
pub fn ensure_no_id(fields: &Fields) -> Result<(), ValidationError> {
    if fields.contains_key(ID_FIELD) {
        return Err(ValidationError::ImmutableField { field: ID_FIELD });
    }
    Ok(())
}
