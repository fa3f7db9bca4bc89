//! Single-use password-reset workflow

use std::sync::Arc;

use janus_db::IdentityStore;

use crate::{AuthError, Mailer};

const RESET_MAIL_SUBJECT: &str = "Password Reset Request";

/// Issues and redeems single-use password-reset tokens
///
/// The tokens themselves are owned by the identity store; this workflow
/// orchestrates lookup, link construction and mail dispatch without ever
/// revealing whether an email address is registered.
pub struct ResetWorkflow<S: IdentityStore, M: Mailer> {
    store: Arc<S>,
    mailer: Arc<M>,
    /// Base URL the redemption link is built under
    reset_base_url: String,
}

impl<S: IdentityStore, M: Mailer> ResetWorkflow<S, M> {
    /// Create a new reset workflow
    pub fn new(store: Arc<S>, mailer: Arc<M>, reset_base_url: impl Into<String>) -> Self {
        Self {
            store,
            mailer,
            reset_base_url: reset_base_url.into(),
        }
    }

    /// Request a reset for an email address
    ///
    /// Reports success whether or not the email is registered; for an
    /// unknown address no token is generated and no mail is sent.
    pub async fn request(&self, email: &str) -> Result<(), AuthError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            tracing::debug!("password reset requested for unregistered email");
            return Ok(());
        };

        let token = self.store.generate_reset_token(user.id).await?;
        let link = self.reset_link(email, &token);
        let body =
            format!("<html><p>Click the following link to reset your password: {link}</p></html>");

        self.mailer
            .send(email, RESET_MAIL_SUBJECT, &body)
            .await
            .map_err(|e| {
                tracing::error!("reset mail dispatch failed: {}", e);
                AuthError::Internal("reset mail dispatch failed".to_string())
            })?;

        Ok(())
    }

    /// Redeem a reset token, replacing the credential
    ///
    /// Unknown email, invalid/expired/consumed token and policy-failing
    /// passwords all collapse into `ResetRejected`.
    pub async fn redeem(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            return Err(AuthError::ResetRejected);
        };

        let redeemed = self
            .store
            .redeem_reset_token(user.id, token, new_password)
            .await?;

        if !redeemed {
            return Err(AuthError::ResetRejected);
        }

        tracing::info!(user_id = %user.id, "password reset completed");
        Ok(())
    }

    fn reset_link(&self, email: &str, token: &str) -> String {
        format!(
            "{}/account/reset-password?email={}&token={}",
            self.reset_base_url.trim_end_matches('/'),
            email,
            token
        )
    }
}

impl<S: IdentityStore, M: Mailer> std::fmt::Debug for ResetWorkflow<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetWorkflow")
            .field("reset_base_url", &self.reset_base_url)
            .finish_non_exhaustive()
    }
}
