//! Authentication outcome types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RoleName, UserId};

/// Outcome of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Signed bearer token
    pub token: String,
    /// Instant the token stops being valid
    pub expires_at: DateTime<Utc>,
    /// Roles bound to the user at issuance time
    pub roles: Vec<RoleName>,
    /// User ID
    pub user_id: UserId,
    /// Username the token was issued for
    pub username: String,
}

/// Outcome of a successful application-scoped login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationLoginOutcome {
    /// Signed bearer token
    pub token: String,
    /// User ID
    pub user_id: UserId,
    /// Username the token was issued for
    pub username: String,
    /// Whether the user holds an entitlement for the requested application
    pub is_entitled: bool,
}

/// A user as reported to administrative callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub roles: Vec<RoleName>,
}
