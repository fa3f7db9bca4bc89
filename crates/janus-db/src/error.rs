//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Password rejected by the store's policy
    #[error("password rejected: {0}")]
    PasswordPolicy(&'static str),

    /// Internal store error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
