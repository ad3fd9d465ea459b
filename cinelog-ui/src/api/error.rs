//! HTTP error mapping
//!
//! One error type for all handlers. Validation, not-found and conflict
//! outcomes carry user-visible messages; anonymous access to a guarded
//! route redirects to the sign-in page instead of leaking anything.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// API error taxonomy
#[derive(Debug)]
pub enum ApiError {
    /// Bad form input; the caller re-renders with the message
    Validation(String),
    /// Sign-in failed; deliberately does not say which field was wrong
    InvalidCredentials,
    /// Guarded operation reached without a live session (or privilege)
    SignInRequired,
    /// Unknown movie or list entry
    NotFound(String),
    /// Duplicate username or duplicate list entry
    Conflict(String),
    /// Storage or other unexpected failure
    Internal(String),
}

impl From<cinelog_common::Error> for ApiError {
    fn from(err: cinelog_common::Error) -> Self {
        use cinelog_common::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::Validation(msg),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            other => {
                error!("{}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::SignInRequired => {
                return Redirect::to("/signin").into_response();
            }
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Username or Password is incorrect.".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
