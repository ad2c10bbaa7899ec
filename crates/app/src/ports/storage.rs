//! Storage ports — counter and document persistence.

use std::future::Future;

use recordhub_domain::document::{Document, Fields};
use recordhub_domain::error::RecordHubError;
use recordhub_domain::filter::Filter;
use recordhub_domain::id::DocumentId;

/// Persisted sequence counters used to mint identifiers.
///
/// Implementations must make [`next_value`](Self::next_value) atomic at the
/// storage layer: two concurrent calls for the same key never observe the
/// same value.
pub trait CounterStore {
    /// Increment the counter named `key` and return the new value.
    ///
    /// A missing counter is created so that the first call returns `1`.
    fn next_value(&self, key: &str) -> impl Future<Output = Result<i64, RecordHubError>> + Send;

    /// Read the counter without incrementing it. `None` if never allocated.
    fn current_value(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<i64>, RecordHubError>> + Send;
}

/// Repository for the documents of one collection.
pub trait DocumentRepository {
    /// Persist a new document under its identifier.
    fn insert(
        &self,
        document: Document,
    ) -> impl Future<Output = Result<Document, RecordHubError>> + Send;

    /// Get a document by identifier.
    fn get_by_id(
        &self,
        id: DocumentId,
    ) -> impl Future<Output = Result<Option<Document>, RecordHubError>> + Send;

    /// Find every document satisfying `filter`, ordered by identifier.
    fn find(
        &self,
        filter: Filter,
    ) -> impl Future<Output = Result<Vec<Document>, RecordHubError>> + Send;

    /// Overwrite top-level fields of an existing document and return the
    /// merged result. `None` if no document has `id`.
    fn update_fields(
        &self,
        id: DocumentId,
        fields: Fields,
    ) -> impl Future<Output = Result<Option<Document>, RecordHubError>> + Send;

    /// Remove a document and return it as it was just before removal.
    /// `None` if no document has `id`.
    fn delete(
        &self,
        id: DocumentId,
    ) -> impl Future<Output = Result<Option<Document>, RecordHubError>> + Send;
}
