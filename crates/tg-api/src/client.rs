//! Telegram Bot API client
//!
//! One client per bot token. Outbound sends carry a bounded timeout and are
//! treated as best-effort by callers; getUpdates long-polls with a wider
//! per-request timeout so the server-side wait can complete.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::{ApiResponse, Update};

/// Default timeout for outbound calls (sendMessage, webhook management).
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Headroom added on top of the server-side long-poll wait.
const POLL_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Telegram Bot API client
#[derive(Clone)]
pub struct BotApi {
    client: Client,
    base_url: String,
}

impl BotApi {
    /// Create a new client for the given bot token.
    pub fn new(token: &str) -> Result<Self> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: format!("https://api.telegram.org/bot{token}"),
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Send a text message to a chat. Markdown markup is enabled, matching
    /// what the report formatters produce.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        debug!(chat_id, "sending message");

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?;

        read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Long-poll for updates. `timeout_secs` is the server-side wait; the
    /// request itself is allowed a little extra so a full wait can return
    /// empty-handed without tripping the client timeout.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>> {
        let mut params = vec![("timeout", timeout_secs.to_string())];
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }

        let response = self
            .client
            .get(self.api_url("getUpdates"))
            .query(&params)
            .timeout(Duration::from_secs(timeout_secs) + POLL_TIMEOUT_MARGIN)
            .send()
            .await?;

        read_envelope(response).await
    }

    /// Register the webhook callback URL.
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let body = serde_json::json!({ "url": url });

        let response = self
            .client
            .post(self.api_url("setWebhook"))
            .json(&body)
            .send()
            .await?;

        read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Remove any existing webhook registration.
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<()> {
        let body = serde_json::json!({ "drop_pending_updates": drop_pending_updates });

        let response = self
            .client
            .post(self.api_url("deleteWebhook"))
            .json(&body)
            .send()
            .await?;

        read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }
}

/// Decode the Bot API envelope, turning `ok=false` into an `Api` error.
async fn read_envelope<T: DeserializeOwned + Default>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    let envelope: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    if !envelope.ok {
        return Err(ApiError::Api {
            code: envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
            description: envelope
                .description
                .unwrap_or_else(|| "unknown Telegram API error".to_string()),
        });
    }

    envelope
        .result
        .ok_or_else(|| ApiError::Parse("missing result field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let api = BotApi::new("123456:TEST");
        assert!(api.is_ok());
    }

    #[test]
    fn test_api_url() {
        let api = BotApi::new("123456:TEST").unwrap();
        assert_eq!(
            api.api_url("getUpdates"),
            "https://api.telegram.org/bot123456:TEST/getUpdates"
        );
    }
}
