//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dealflow_domain::error::DealflowError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DealflowError`] to an HTTP response with appropriate status code.
pub struct ApiError(DealflowError);

impl From<DealflowError> for ApiError {
    fn from(err: DealflowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DealflowError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DealflowError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            DealflowError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            DealflowError::Generation(err) => {
                tracing::error!(error = %err, "generation error");
                (
                    StatusCode::BAD_GATEWAY,
                    "rule generation unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
