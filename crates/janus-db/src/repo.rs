//! Repository traits
//!
//! Capability contracts the core consumes. Implementations own all durable
//! state; the core holds nothing in memory between requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// Identity store capability set
///
/// Owns users, roles, password credentials and reset tokens. The password
/// verification routine is the store's own (hashed, constant-time by
/// construction in the Postgres implementation).
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by username (case handling is the store's choice)
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// List all users
    async fn list(&self) -> DbResult<Vec<UserRow>>;

    /// Create a new user; the store hashes the password and enforces policy
    async fn create(&self, user: NewUser) -> DbResult<UserRow>;

    /// Delete a user (role bindings are removed by the caller first)
    async fn delete(&self, id: Uuid) -> DbResult<()>;

    /// Check a password against the user's stored credential
    async fn check_password(&self, user: &UserRow, password: &str) -> DbResult<bool>;

    /// Names of the roles bound to a user; empty when none
    async fn roles_of(&self, user_id: Uuid) -> DbResult<Vec<String>>;

    /// Whether a role with this name is registered
    async fn role_exists(&self, role: &str) -> DbResult<bool>;

    /// Register a role
    async fn create_role(&self, role: &str) -> DbResult<()>;

    /// Bind a user to a role
    async fn add_to_role(&self, user_id: Uuid, role: &str) -> DbResult<()>;

    /// Remove a role binding
    async fn remove_from_role(&self, user_id: Uuid, role: &str) -> DbResult<()>;

    /// Issue a single-use password-reset token bound to the user
    ///
    /// Only a hash of the token is retained; issuing a new token invalidates
    /// any outstanding one.
    async fn generate_reset_token(&self, user_id: Uuid) -> DbResult<String>;

    /// Redeem a reset token, replacing the credential
    ///
    /// Returns `false` when the token does not validate (unknown, expired or
    /// already consumed) or the new password fails policy. On success the
    /// token is consumed in the same transaction that replaces the credential.
    async fn redeem_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        new_password: &str,
    ) -> DbResult<bool>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Plaintext password; hashed by the store on the way in
    pub password: String,
}

/// Entitlement relation capability set
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Find the entitlement row for one (user, application) pair
    async fn find(&self, user_id: Uuid, application_id: i32) -> DbResult<Option<EntitlementRow>>;

    /// All entitlement rows held by a user
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Vec<EntitlementRow>>;

    /// Apply a batch of grants and revokes for one user atomically
    ///
    /// Either every row in the batch is written or none is; the transaction
    /// boundary lives here, not with the caller.
    async fn apply(
        &self,
        user_id: Uuid,
        grants: &[NewEntitlement],
        revokes: &[i32],
    ) -> DbResult<()>;
}

/// Create entitlement input
#[derive(Debug, Clone)]
pub struct NewEntitlement {
    pub application_id: i32,
    pub credential_label: String,
}

/// Read-only application catalog
#[async_trait]
pub trait ApplicationCatalog: Send + Sync {
    /// Look up an application by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<ApplicationRow>>;

    /// List all registered applications
    async fn list(&self) -> DbResult<Vec<ApplicationRow>>;
}
