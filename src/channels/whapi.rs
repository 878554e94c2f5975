//! Whapi reply sender — posts plain text messages to the provider's send API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::channels::ReplySender;
use crate::config::ReplyConfig;
use crate::error::ChannelError;

/// Sends `{ "to": ..., "body": ... }` to a configured endpoint with a bearer token.
pub struct WhapiSender {
    send_url: String,
    token: SecretString,
    client: reqwest::Client,
}

impl WhapiSender {
    pub fn new(config: &ReplyConfig, client: reqwest::Client) -> Self {
        Self {
            send_url: config.send_url.clone(),
            token: config.token.clone(),
            client,
        }
    }

    fn send_failed(&self, reason: String) -> ChannelError {
        ChannelError::SendFailed {
            name: self.name().into(),
            reason,
        }
    }
}

#[async_trait]
impl ReplySender for WhapiSender {
    fn name(&self) -> &str {
        "whapi"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        let payload = serde_json::json!({
            "to": to,
            "body": body,
        });

        let resp = self
            .client
            .post(&self.send_url)
            .bearer_auth(self.token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.send_failed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = resp.text().await.unwrap_or_default();
            return Err(self.send_failed(format!("send API returned {status}: {err}")));
        }

        tracing::info!(to = %to, "Reply sent to WhatsApp");
        Ok(())
    }
}
