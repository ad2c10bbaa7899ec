//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use recordhub_domain::error::{RecordHubError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`RecordHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(RecordHubError);

impl From<RecordHubError> for ApiError {
    fn from(err: RecordHubError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(
            ValidationError::InvalidBody {
                reason: rejection.body_text(),
            }
            .into(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RecordHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            RecordHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            RecordHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
