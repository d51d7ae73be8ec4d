//! User management endpoints
//! Mission: Administrative account CRUD

use crate::{
    api::{ApiError, AppState},
    auth::{
        authorize,
        models::{Claims, User, UserRole, UserUpdate},
    },
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn parse_user_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Validation("Invalid user id format".to_string()))
}

/// List all accounts - GET /api/users (Admin only)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<User>>, ApiError> {
    authorize(&claims, UserRole::Admin)?;

    let users = state.users.list_users()?;
    Ok(Json(users))
}

/// Get a single account - GET /api/users/:id (any valid token)
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;

    let user = state
        .users
        .get_user_by_id(&id)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update an account - PUT /api/users/:id (Admin only)
///
/// Partial update: absent fields are left untouched.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    authorize(&claims, UserRole::Admin)?;

    let id = parse_user_id(&id)?;

    let user = state
        .users
        .update_user(&id, &update)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Delete an account - DELETE /api/users/:id (Admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    authorize(&claims, UserRole::Admin)?;

    let id = parse_user_id(&id)?;

    if !state.users.delete_user(&id)? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
    }))
}
