//! Entitlement handlers (assignment listing, reconciliation, catalog)

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use janus_db::ApplicationCatalog;
use janus_types::{DesiredAssignment, EntitlementView, UserId};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub username: String,
    pub assignments: Vec<DesiredAssignment>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// GET /api/applications
///
/// The registered application catalog
pub async fn list_applications(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    let apps = state.repos.applications.list().await?;
    Ok(Json(
        apps.into_iter()
            .map(|app| ApplicationResponse {
                id: app.id,
                name: app.name,
                description: app.description,
                created_at: app.created_at,
            })
            .collect(),
    ))
}

/// GET /api/users/{id}/applications
///
/// The user's current entitlement rows
pub async fn user_assignments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<EntitlementView>>> {
    let assignments = state.auth.assignments_for(UserId(id)).await?;
    Ok(Json(assignments))
}

/// PUT /api/users/{id}/applications
///
/// Submit a desired entitlement list; only listed applications are touched
/// and the whole delta commits atomically
pub async fn reconcile_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReconcileRequest>,
) -> ApiResult<()> {
    tracing::info!(
        actor = %auth.username,
        user_id = %id,
        entries = req.assignments.len(),
        "entitlement reconciliation requested"
    );
    state
        .auth
        .reconcile_entitlements(UserId(id), &req.username, &req.assignments)
        .await?;
    Ok(())
}
