//! User management handlers (register, list, lookup, delete)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use janus_types::{RoleName, UserId, UserProfile};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: RoleName,
}

/// POST /api/auth/register
///
/// Create a user and bind the requested role; the built-in roles are
/// registered lazily on first use
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let profile = state
        .auth
        .register(&req.username, &req.email, &req.password, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = state.auth.list_users().await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.auth.user_profile(UserId(id)).await?;
    Ok(Json(profile))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    tracing::info!(actor = %auth.username, user_id = %id, "user deletion requested");
    state.auth.delete_user(UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
