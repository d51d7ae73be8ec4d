//! Authentication API Endpoints
//! Mission: Provide registration and login

use crate::{
    api::{ApiError, AppState},
    auth::models::{
        LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse, UserRole,
        UserStatus,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

/// Register endpoint - POST /api/auth/register
///
/// Role defaults to User, status to Active. The plaintext password is hashed
/// immediately and never logged or echoed back.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if state.users.get_user_by_email(&payload.email)?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let role = payload.role.unwrap_or(UserRole::User);
    let user = state.users.create_user(
        &payload.name,
        &payload.email,
        &payload.password,
        role,
        UserStatus::Active,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login endpoint - POST /api/auth/login
///
/// An unknown email and a wrong password both yield the same
/// InvalidCredentials outcome.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let valid = state.users.verify_password(&payload.email, &payload.password)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.email);
        return Err(ApiError::InvalidCredentials);
    }

    let user = state
        .users
        .get_user_by_email(&payload.email)?
        .ok_or(ApiError::InvalidCredentials)?;

    let token = state.jwt.generate_token(&user)?;

    info!("🔐 Login successful: {} ({})", user.email, user.role.as_str());

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from_user(&user),
    }))
}
