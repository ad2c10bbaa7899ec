//! Shared application state for axum handlers.

use std::sync::Arc;

use recordhub_app::ports::{CounterStore, DocumentRepository};
use recordhub_app::services::document_service::DocumentService;

/// Application state shared across all axum handlers.
///
/// Generic over the document repository and counter store to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R, C> {
    /// Document service for the collection this deployment serves.
    pub document_service: Arc<DocumentService<R, C>>,
}

impl<R, C> Clone for AppState<R, C> {
    fn clone(&self) -> Self {
        Self {
            document_service: Arc::clone(&self.document_service),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(document_service: DocumentService<R, C>) -> Self {
        Self {
            document_service: Arc::new(document_service),
        }
    }
}
