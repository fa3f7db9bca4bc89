//! Mail dispatch capability

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the mail collaborator
#[derive(Debug, Error)]
pub enum MailError {
    /// The message could not be handed to the transport
    #[error("mail dispatch failed: {0}")]
    Send(String),
}

/// Outbound mail capability
///
/// Fire-and-forget from the core's perspective; failures are surfaced to the
/// caller, never retried here.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one HTML message
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}
