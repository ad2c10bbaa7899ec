//! JSON REST handlers for the documents of one collection.
//!
//! The same handlers serve `/cars` and `/employees`; the collection comes
//! from the [`CollectionSchema`](recordhub_domain::schema::CollectionSchema)
//! of the service held in the state.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use recordhub_app::ports::{CounterStore, DocumentRepository};
use recordhub_domain::document::{Document, Fields};
use recordhub_domain::error::{LookupKey, NotFoundError, RecordHubError};
use recordhub_domain::filter::Filter;
use recordhub_domain::id::DocumentId;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Document>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update, and delete endpoints.
pub enum DocumentResponse {
    Ok(Json<Document>),
}

impl IntoResponse for DocumentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Document>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Parse the `{id}` path segment.
///
/// A segment that is not an integer cannot name any document, so it is
/// reported as not found rather than as a malformed request.
fn parse_id<R, C>(state: &AppState<R, C>, raw: &str) -> Result<DocumentId, ApiError>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    raw.parse().map_err(|_| {
        ApiError::from(RecordHubError::from(NotFoundError {
            entity: state.document_service.schema().label,
            key: LookupKey::Filter(format!("_id={raw:?}")),
        }))
    })
}

/// `GET /{collection}?field=value&…`
pub async fn list<R, C>(
    State(state): State<AppState<R, C>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ListResponse, ApiError>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    let filter = Filter::from_query(params);
    let documents = state.document_service.find_matching(filter).await?;
    Ok(ListResponse::Ok(Json(documents)))
}

/// `GET /{collection}/{id}`
pub async fn get<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<DocumentResponse, ApiError>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    let id = parse_id(&state, &id)?;
    let document = state.document_service.find_by_id(id).await?;
    Ok(DocumentResponse::Ok(Json(document)))
}

/// `POST /{collection}`
pub async fn create<R, C>(
    State(state): State<AppState<R, C>>,
    body: Result<Json<Fields>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    let Json(fields) = body?;
    let created = state.document_service.create(fields).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /{collection}/{id}`
pub async fn update<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
    body: Result<Json<Fields>, JsonRejection>,
) -> Result<DocumentResponse, ApiError>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    let id = parse_id(&state, &id)?;
    let Json(fields) = body?;
    let updated = state.document_service.replace_fields(id, fields).await?;
    Ok(DocumentResponse::Ok(Json(updated)))
}

/// `DELETE /{collection}/{id}`
pub async fn delete<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> Result<DocumentResponse, ApiError>
where
    R: DocumentRepository + Send + Sync + 'static,
    C: CounterStore + Send + Sync + 'static,
{
    let id = parse_id(&state, &id)?;
    let deleted = state.document_service.delete(id).await?;
    Ok(DocumentResponse::Ok(Json(deleted)))
}
