//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation and role checks

use crate::auth::{
    jwt::JwtHandler,
    models::{Claims, UserRole},
};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Auth middleware that validates JWT tokens
///
/// On success the decoded claims are inserted into the request extensions so
/// downstream handlers can read the caller's identity and role.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_handler
        .validate_token(&token)
        .map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Role check for protected operations
///
/// Admin-only handlers run this after the token middleware has established the
/// caller's claims.
pub fn authorize(claims: &Claims, required: UserRole) -> Result<(), AuthError> {
    if claims.role != required {
        return Err(AuthError::Forbidden);
    }
    Ok(())
}

/// Auth error types
///
/// Status codes mirror the service contract: a missing token is 401, while an
/// invalid or expired token is 400 and a role mismatch is 403.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Access denied. No token provided.",
            ),
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, "Invalid token"),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "Access denied. Admin only."),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
