//! HTTP mail-relay implementation of the core's Mailer capability

use std::time::Duration;

use async_trait::async_trait;
use janus_auth_core::{MailError, Mailer};
use serde::Serialize;

/// Outbound message shape the relay accepts
#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Mailer that hands messages to an HTTP mail relay
///
/// Fire-and-forget: one POST per message, no retries here.
#[derive(Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

impl RelayMailer {
    /// Create a new relay mailer with a fail-fast HTTP client
    pub fn new(relay_url: impl Into<String>, from: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(2)
            .tcp_nodelay(true)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            relay_url: relay_url.into(),
            from: from.into(),
        }
    }

    /// Create a relay mailer with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(
        client: reqwest::Client,
        relay_url: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client,
            relay_url: relay_url.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            html: html_body,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Send(format!(
                "relay returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for RelayMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayMailer")
            .field("relay_url", &self.relay_url)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}
