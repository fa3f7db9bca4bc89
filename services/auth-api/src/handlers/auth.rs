//! Authentication handlers (login, application login, password reset)

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use janus_types::{ApplicationId, ApplicationLoginOutcome, LoginOutcome};

use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationLoginRequest {
    pub username: String,
    pub password: String,
    pub application_id: ApplicationId,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
///
/// Verify credentials and issue a signed token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginOutcome>> {
    let outcome = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(outcome))
}

/// POST /api/auth/application-login
///
/// Verify credentials, issue a token, and report whether the user is
/// entitled to the named application
pub async fn application_login(
    State(state): State<AppState>,
    Json(req): Json<ApplicationLoginRequest>,
) -> ApiResult<Json<ApplicationLoginOutcome>> {
    let outcome = state
        .auth
        .login_to_application(&req.username, &req.password, req.application_id)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/auth/password-reset/request
///
/// Always reports success; unknown emails are indistinguishable from known
/// ones in the response
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> ApiResult<()> {
    state.auth.request_password_reset(&req.email).await?;
    Ok(())
}

/// POST /api/auth/password-reset/confirm
///
/// Redeem a single-use reset token and replace the credential
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetConfirm>,
) -> ApiResult<()> {
    state
        .auth
        .reset_password(&req.email, &req.token, &req.new_password)
        .await?;
    Ok(())
}
