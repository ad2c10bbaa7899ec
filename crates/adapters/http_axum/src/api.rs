//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod documents;

use axum::Router;
use axum::routing::get;

use recordhub_app::ports::{CounterStore, DocumentRepository};

use crate::state::AppState;

/// Build the collection sub-router, mounted at `/{collection}`.
pub fn routes<R, C>(collection: &str) -> Router<AppState<R, C>>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            &format!("/{collection}"),
            get(documents::list::<R, C>).post(documents::create::<R, C>),
        )
        .route(
            &format!("/{collection}/{{id}}"),
            get(documents::get::<R, C>)
                .put(documents::update::<R, C>)
                .delete(documents::delete::<R, C>),
        )
}
