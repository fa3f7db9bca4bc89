//! Janus DB - Database abstractions
//!
//! SQLx-based persistence layer for the Janus auth gateway. The capability
//! traits in [`repo`] are what the core consumes; [`pg`] holds the Postgres
//! implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use janus_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/janus").await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.identities.find_by_username("alice").await?;
//! ```

pub mod error;
pub mod models;
pub mod password;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
