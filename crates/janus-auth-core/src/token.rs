//! Signed token construction and verification

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{AuthError, ClaimSet, TokenConfig};

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Token id, fresh per issuance
    pub jti: String,
    /// Role names bound to the subject at issuance
    #[serde(default)]
    pub roles: Vec<String>,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl TokenClaims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// An issued token together with its expiry instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedToken {
    /// Compact JWT
    pub token: String,
    /// Instant the token stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Signs claim sets into time-bounded tokens with a shared symmetric key
///
/// Constructed once at startup from a validated [`TokenConfig`]; there is no
/// per-request failure path for configuration. Issued tokens cannot be
/// revoked before expiry; validity is purely time- and signature-based.
pub struct TokenIssuer {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    /// Create a new token issuer
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` for a secret below the minimum
    /// length or an empty issuer/audience. Callers must treat this as fatal.
    pub fn new(config: TokenConfig) -> Result<Self, AuthError> {
        // Re-validate: TokenConfig fields are public and a hand-built value
        // must not slip an empty secret past startup
        if config.secret.len() < TokenConfig::MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(
                "signing secret below minimum length".to_string(),
            ));
        }
        if config.issuer.is_empty() || config.audience.is_empty() {
            return Err(AuthError::Configuration(
                "issuer and audience must not be empty".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Sign a claim set into a token expiring `validity` from now
    pub fn issue(&self, claims: &ClaimSet) -> Result<SignedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + ChronoDuration::seconds(self.config.validity.as_secs() as i64);

        let token_claims = TokenClaims {
            sub: claims.subject.clone(),
            jti: claims.token_id.to_string(),
            roles: claims.roles.iter().map(|r| r.to_string()).collect(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &token_claims,
            &self.encoding_key,
        )
        .map_err(|e| {
            tracing::error!("token encoding failed: {}", e);
            AuthError::Internal("token encoding failed".to_string())
        })?;

        Ok(SignedToken { token, expires_at })
    }

    /// Validate a token and return its claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// The configured validity window
    pub fn validity(&self) -> std::time::Duration {
        self.config.validity
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("validity", &self.config.validity)
            .finish_non_exhaustive()
    }
}
