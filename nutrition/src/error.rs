//! Application error handling
//!
//! Converts request-processing errors to the service's flat JSON error
//! shape: `{"error": "<message>"}`. Upstream failures on the token path
//! surface as 500s; per-item lookup failures never reach this layer (the
//! aggregator absorbs them).

use crate::fatsecret::UpstreamError;
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
    #[error("{0}")]
    BadRequest(String),

    #[error("Nutrition provider error: {0}")]
    Upstream(#[from] UpstreamError),

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
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upstream(err) => {
                error!("Upstream error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
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
