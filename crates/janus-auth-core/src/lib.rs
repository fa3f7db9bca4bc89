//! Janus Auth Core - Authentication business logic
//!
//! Core gateway functionality: credential verification, claim assembly,
//! signed token issuance, per-application entitlement decisions and
//! reconciliation, and the single-use password-reset workflow.

pub mod claims;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod mailer;
pub mod reset;
pub mod service;
pub mod token;

pub use claims::ClaimSet;
pub use config::TokenConfig;
pub use entitlement::EntitlementEngine;
pub use error::AuthError;
pub use mailer::{MailError, Mailer};
pub use reset::ResetWorkflow;
pub use service::AuthService;
pub use token::{SignedToken, TokenClaims, TokenIssuer};
