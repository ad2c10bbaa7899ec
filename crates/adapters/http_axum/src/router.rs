//! Axum router assembly.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use recordhub_app::ports::{CounterStore, DocumentRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the collection routes of the service held in `state` (e.g. `/cars`)
/// next to `/health`. Requests running longer than `request_timeout` are
/// answered with `408 Request Timeout`. Includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<R, C>(state: AppState<R, C>, request_timeout: Duration) -> Router
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    let collection = state.document_service.schema().collection;

    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes(collection))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
