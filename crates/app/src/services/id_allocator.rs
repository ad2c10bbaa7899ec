//! Identifier allocator — mints per-collection sequence numbers.

use recordhub_domain::error::RecordHubError;
use recordhub_domain::id::DocumentId;

use crate::ports::CounterStore;

/// Hands out strictly increasing [`DocumentId`]s backed by a [`CounterStore`].
///
/// An identifier is spent as soon as it is returned; there is no way to give
/// one back, so a failed insert afterwards leaves a gap in the sequence.
pub struct IdAllocator<C> {
    counters: C,
}

impl<C: CounterStore> IdAllocator<C> {
    /// Create a new allocator backed by the given counter store.
    pub fn new(counters: C) -> Self {
        Self { counters }
    }

    /// Allocate the next identifier for `counter_key`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the counter store.
    #[tracing::instrument(skip(self))]
    pub async fn allocate(&self, counter_key: &str) -> Result<DocumentId, RecordHubError> {
        let value = self.counters.next_value(counter_key).await?;
        tracing::debug!(value, "allocated identifier");
        Ok(DocumentId::new(value))
    }

    /// Last identifier handed out for `counter_key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the counter store.
    pub async fn last_allocated(
        &self,
        counter_key: &str,
    ) -> Result<Option<DocumentId>, RecordHubError> {
        let value = self.counters.current_value(counter_key).await?;
        Ok(value.map(DocumentId::new))
    }
}
