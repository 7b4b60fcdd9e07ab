//! Application error handling
//!
//! Converts request-processing errors to the service's flat JSON error
//! shape: `{"error": "<message>"}`. Validation failures surface their
//! message to the caller verbatim; internal failures are logged and
//! reported generically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Field '{field}' must be numeric, got '{value}'")]
    MalformedInput { field: String, value: String },

    #[error("Missing required field '{0}'")]
    MissingField(String),

    #[error("Unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MalformedInput { .. }
            | ApiError::MissingField(_)
            | ApiError::UnknownCategory { .. }
            | ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
