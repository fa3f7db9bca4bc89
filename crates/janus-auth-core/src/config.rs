//! Configuration types for token issuance

use std::time::Duration;

use crate::AuthError;

/// Token issuance configuration
///
/// Constructed once at startup; an invalid configuration is fatal there and
/// must never surface as a per-request error.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing secret, shared out-of-band with every verifier
    pub secret: String,
    /// Issuer claim stamped into every token
    pub issuer: String,
    /// Audience claim stamped into every token
    pub audience: String,
    /// How long an issued token stays valid
    pub validity: Duration,
}

impl TokenConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Default token validity
    pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(3 * 60 * 60);

    /// Create a validated token config
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` when the secret is shorter than
    /// [`Self::MIN_SECRET_LENGTH`] or the issuer/audience is empty.
    pub fn try_new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "signing secret too short: got {} bytes, need at least {}",
                secret.len(),
                Self::MIN_SECRET_LENGTH
            )));
        }

        let issuer = issuer.into();
        if issuer.is_empty() {
            return Err(AuthError::Configuration("issuer must not be empty".to_string()));
        }

        let audience = audience.into();
        if audience.is_empty() {
            return Err(AuthError::Configuration("audience must not be empty".to_string()));
        }

        Ok(Self {
            secret,
            issuer,
            audience,
            validity: Self::DEFAULT_VALIDITY,
        })
    }

    /// Set token validity
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }
}

impl std::fmt::Display for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TokenConfig {{ issuer: {}, audience: {}, validity: {:?} }}",
            self.issuer, self.audience, self.validity
        )
    }
}
