//! Defines the custom `ApiError` type for the HTTP server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::relay::RelayError;

/// A custom error type for the API that can be converted into an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// The request body is not a valid notification batch.
    MalformedInput(String),

    /// Represents a resource that could not be found.
    NotFound,

    /// Represents a generic internal server error.
    InternalServerError(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedInput(err.to_string())
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::TaskFailed(e) => ApiError::InternalServerError(e.to_string()),
        }
    }
}

/// Implements the conversion from `ApiError` into an `axum` response.
///
/// This is the central point for mapping internal application errors to
/// user-facing HTTP responses.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::MalformedInput(message) => {
                tracing::warn!("Invalid JSON: {}", message);
                (StatusCode::BAD_REQUEST, json!({ "error": format!("Invalid JSON: {message}") }))
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "Not found" })),
            ApiError::InternalServerError(err) => {
                tracing::error!("Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
