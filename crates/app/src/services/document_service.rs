//! Document service — use-cases for one entity collection.

use recordhub_domain::document::{Document, Fields, ensure_no_id};
use recordhub_domain::error::{LookupKey, NotFoundError, RecordHubError};
use recordhub_domain::filter::Filter;
use recordhub_domain::id::DocumentId;
use recordhub_domain::schema::CollectionSchema;

use crate::ports::{CounterStore, DocumentRepository};
use crate::services::id_allocator::IdAllocator;

/// Application service for the documents of a single collection.
///
/// The same service backs both the car and the employee deployments; only
/// the [`CollectionSchema`] differs.
pub struct DocumentService<R, C> {
    schema: CollectionSchema,
    repo: R,
    allocator: IdAllocator<C>,
}

impl<R, C> DocumentService<R, C>
where
    R: DocumentRepository,
    C: CounterStore,
{
    /// Create a new service for `schema`, backed by the given repository and
    /// identifier allocator.
    pub fn new(schema: CollectionSchema, repo: R, allocator: IdAllocator<C>) -> Self {
        Self {
            schema,
            repo,
            allocator,
        }
    }

    /// The schema this service enforces.
    #[must_use]
    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    fn not_found(&self, key: LookupKey) -> RecordHubError {
        NotFoundError {
            entity: self.schema.label,
            key,
        }
        .into()
    }

    /// Look up a document by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecordHubError::NotFound`] when no document has `id`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self), fields(collection = self.schema.collection))]
    pub async fn find_by_id(&self, id: DocumentId) -> Result<Document, RecordHubError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| self.not_found(LookupKey::Id(id.value())))
    }

    /// List every document matching `filter`. An empty filter lists the
    /// whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`RecordHubError::NotFound`] when nothing matches,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, filter), fields(collection = self.schema.collection, filter = %filter))]
    pub async fn find_matching(&self, filter: Filter) -> Result<Vec<Document>, RecordHubError> {
        let description = filter.to_string();
        let documents = self.repo.find(filter).await?;
        if documents.is_empty() {
            return Err(self.not_found(LookupKey::Filter(description)));
        }
        Ok(documents)
    }

    /// Validate required fields, allocate an identifier, and persist a new
    /// document.
    ///
    /// No identifier is allocated when validation fails. Once allocated, the
    /// identifier stays spent even if the insert fails.
    ///
    /// # Errors
    ///
    /// Returns [`RecordHubError::Validation`] if a required field is missing,
    /// or a storage error from the counter store or repository.
    #[tracing::instrument(skip(self, fields), fields(collection = self.schema.collection))]
    pub async fn create(&self, fields: Fields) -> Result<Document, RecordHubError> {
        if let Err(err) = self.schema.validate(&fields) {
            tracing::warn!(error = %err, "rejected create");
            return Err(err.into());
        }
        let id = self.allocator.allocate(self.schema.counter_key).await?;
        let document = Document::new(id, fields);
        self.repo.insert(document).await
    }

    /// Overwrite the given top-level fields of an existing document and
    /// return the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`RecordHubError::Validation`] if `fields` tries to set `_id`,
    /// [`RecordHubError::NotFound`] when no document has `id`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, fields), fields(collection = self.schema.collection))]
    pub async fn replace_fields(
        &self,
        id: DocumentId,
        fields: Fields,
    ) -> Result<Document, RecordHubError> {
        ensure_no_id(&fields)?;
        self.repo
            .update_fields(id, fields)
            .await?
            .ok_or_else(|| self.not_found(LookupKey::Id(id.value())))
    }

    /// Remove a document and return its last state.
    ///
    /// # Errors
    ///
    /// Returns [`RecordHubError::NotFound`] when no document has `id`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self), fields(collection = self.schema.collection))]
    pub async fn delete(&self, id: DocumentId) -> Result<Document, RecordHubError> {
        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| self.not_found(LookupKey::Id(id.value())))
    }

    /// Last identifier minted for this collection, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the counter store.
    pub async fn last_allocated_id(&self) -> Result<Option<DocumentId>, RecordHubError> {
        self.allocator.last_allocated(self.schema.counter_key).await
    }
}
