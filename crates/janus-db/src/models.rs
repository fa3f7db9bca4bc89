//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the identity store
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Opaque password credential (PHC string); owned by the store
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role row from the identity store
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
}

/// Application row from the catalog
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entitlement row: one user's access to one application
#[derive(Debug, Clone, FromRow)]
pub struct EntitlementRow {
    pub user_id: Uuid,
    pub application_id: i32,
    /// Informational label fixed at grant time; never read for decisions
    pub credential_label: String,
    pub created_at: DateTime<Utc>,
}

// Conversion implementations from row types to janus-types domain types
impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> janus_types::UserId {
        janus_types::UserId(self.id)
    }
}

impl EntitlementRow {
    /// Convert to domain ApplicationId
    pub fn application_id(&self) -> janus_types::ApplicationId {
        janus_types::ApplicationId(self.application_id)
    }

    /// Convert to the caller-facing view
    pub fn to_view(&self) -> janus_types::EntitlementView {
        janus_types::EntitlementView {
            application_id: self.application_id(),
            credential_label: self.credential_label.clone(),
        }
    }
}
