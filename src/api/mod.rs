//! HTTP surface: route table, handlers, and the shared error envelope.

pub mod analytics;
pub mod routes;
pub mod seed;
pub mod users;

pub use routes::{create_router, AppState};

use crate::auth::middleware::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Handler-boundary error type
///
/// Every failure a handler can hit converts into this enum and renders as the
/// uniform `{message, error?}` JSON envelope. Nothing propagates unhandled to
/// the transport layer.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input (e.g. an unparseable id) -> 400
    Validation(String),
    /// Unknown email or wrong password, deliberately indistinguishable -> 400
    InvalidCredentials,
    /// Registration against an already-taken email -> 400
    DuplicateEmail,
    /// Token-gate failures, status per AuthError
    Auth(AuthError),
    /// Entity lookup miss -> 404
    NotFound(String),
    /// Unexpected store/runtime failure -> 500
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid credentials" })),
            )
                .into_response(),
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "User already exists" })),
            )
                .into_response(),
            ApiError::Auth(err) => err.into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server error", "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
