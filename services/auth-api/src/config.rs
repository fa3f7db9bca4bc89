//! Configuration for the Auth API service.

use std::time::Duration;

use janus_auth_core::TokenConfig;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Token issuance configuration
    pub token: TokenConfig,

    /// Base URL password-reset links are built under
    pub reset_base_url: String,

    /// Mail relay endpoint
    pub mail_relay_url: String,

    /// From address stamped on outbound mail
    pub mail_from: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Signing configuration; a missing or short secret is fatal here,
        // never per-request
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let jwt_issuer =
            std::env::var("JWT_ISSUER").map_err(|_| ConfigError::Missing("JWT_ISSUER"))?;

        let jwt_audience =
            std::env::var("JWT_AUDIENCE").map_err(|_| ConfigError::Missing("JWT_AUDIENCE"))?;

        // Token validity (default 3 hours)
        let validity_hours: u64 = std::env::var("TOKEN_VALIDITY_HOURS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_VALIDITY_HOURS"))?;

        let token = TokenConfig::try_new(&jwt_secret, &jwt_issuer, &jwt_audience)
            .map_err(|e| ConfigError::TokenConfig(e.to_string()))?
            .with_validity(Duration::from_secs(validity_hours * 3600));

        // Password-reset link base
        let reset_base_url = std::env::var("RESET_BASE_URL")
            .map_err(|_| ConfigError::Missing("RESET_BASE_URL"))?;

        // Mail relay
        let mail_relay_url = std::env::var("MAIL_RELAY_URL")
            .map_err(|_| ConfigError::Missing("MAIL_RELAY_URL"))?;

        let mail_from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "no-reply@janus.local".to_string());

        Ok(Self {
            http_port,
            database_url,
            token,
            reset_base_url,
            mail_relay_url,
            mail_from,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Token config error: {0}")]
    TokenConfig(String),
}
