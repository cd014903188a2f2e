//! API error types mapped to HTTP status codes.
//!
//! Each [`ApiError`] variant maps to a specific HTTP status code and produces
//! a JSON response body `{"error": "message"}`.

use ainura_core::GalleryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type that implements `IntoResponse`.
///
/// Each variant maps to an HTTP status code:
/// - `NotFound` → 404
/// - `BadRequest` → 400
/// - `Unauthorized` → 401
/// - `Conflict` → 409
/// - `Internal` → 500
#[derive(Debug)]
pub enum ApiError {
    /// Item or route parameter not found (404).
    NotFound(String),
    /// Invalid request parameters (400).
    BadRequest(String),
    /// Missing or invalid authentication (401).
    Unauthorized(String),
    /// Item already exists (409).
    Conflict(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = axum::Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<GalleryError> for ApiError {
    fn from(err: GalleryError) -> Self {
        match err {
            GalleryError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            GalleryError::UnknownKind(_) | GalleryError::Invalid(_) => {
                ApiError::BadRequest(err.to_string())
            }
            GalleryError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            GalleryError::Io(_) | GalleryError::Json(_) | GalleryError::MalformedListing { .. } => {
                tracing::error!("Storage error: {}", err);
                ApiError::Internal("Storage operation failed".into())
            }
        }
    }
}
