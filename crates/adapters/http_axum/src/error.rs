//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devdepot_domain::error::DepotError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps failures to an HTTP response with the appropriate status code.
pub enum ApiError {
    /// A domain error kind, mapped deterministically.
    Domain(DepotError),
    /// A malformed request parameter, rejected before reaching the core.
    BadRequest(String),
}

impl From<DepotError> for ApiError {
    fn from(err: DepotError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(DepotError::Validation(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Domain(DepotError::UpdateRejected(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(DepotError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(DepotError::OperationRejected(err)) => {
                (StatusCode::CONFLICT, err.to_string())
            }
            Self::Domain(DepotError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
