//! Application state

use std::ops::Deref;
use std::sync::Arc;

use janus_auth_core::AuthService;
use janus_db::pg::{PgEntitlementRepository, PgIdentityStore, Repositories};
use janus_db::DbPool;

use crate::mailer::RelayMailer;

/// Type alias for the auth service with concrete collaborator types
pub type AuthServiceImpl = AuthService<PgIdentityStore, PgEntitlementRepository, RelayMailer>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service: login, entitlements, reset workflow
    pub auth: Arc<AuthServiceImpl>,
    /// Database repositories
    pub repos: Repositories,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: AuthServiceImpl, repos: Repositories, pool: DbPool) -> Self {
        Self {
            auth: Arc::new(auth),
            repos,
            pool: SharedPool(Arc::new(pool)),
        }
    }
}
