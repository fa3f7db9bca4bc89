//! PostgreSQL repository implementations

mod application;
mod entitlement;
mod identity;

pub use application::PgApplicationCatalog;
pub use entitlement::PgEntitlementRepository;
pub use identity::PgIdentityStore;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub identities: PgIdentityStore,
    pub entitlements: PgEntitlementRepository,
    pub applications: PgApplicationCatalog,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            identities: PgIdentityStore::new(pool.clone()),
            entitlements: PgEntitlementRepository::new(pool.clone()),
            applications: PgApplicationCatalog::new(pool),
        }
    }
}
