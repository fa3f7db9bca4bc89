//! Auth errors

use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Bad credentials or unknown identity; never distinguishes the two
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid bearer token (malformed, bad signature, wrong issuer/audience)
    #[error("invalid token")]
    InvalidToken,

    /// Bearer token has expired
    #[error("token expired")]
    TokenExpired,

    /// Reset token invalid, expired or already consumed
    #[error("password reset rejected")]
    ResetRejected,

    /// Password failed the store's policy
    #[error("password rejected: {0}")]
    PasswordPolicy(String),

    /// Username already taken
    #[error("user already exists")]
    UserExists,

    /// Identity or application unknown for an administrative lookup
    #[error("not found")]
    NotFound,

    /// Missing or invalid signing configuration; fatal at startup
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Store unavailable or a transaction failed
    #[error("persistence error")]
    Persistence,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::ResetRejected | Self::PasswordPolicy(_) => 400,
            Self::UserExists => 409,
            Self::NotFound => 404,
            Self::Configuration(_) | Self::Persistence | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::ResetRejected => "RESET_REJECTED",
            Self::PasswordPolicy(_) => "PASSWORD_POLICY",
            Self::UserExists => "USER_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Persistence => "PERSISTENCE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<janus_db::DbError> for AuthError {
    fn from(err: janus_db::DbError) -> Self {
        match err {
            janus_db::DbError::NotFound => Self::NotFound,
            janus_db::DbError::PasswordPolicy(reason) => Self::PasswordPolicy(reason.to_string()),
            // Every unexpected store failure is logged here and surfaced as a
            // generic persistence error; detail never reaches the caller
            janus_db::DbError::Sqlx(e) => {
                tracing::error!("store error: {}", e);
                Self::Persistence
            }
            janus_db::DbError::Internal(msg) => {
                tracing::error!("store error: {}", msg);
                Self::Persistence
            }
        }
    }
}
