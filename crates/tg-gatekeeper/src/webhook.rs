//! Webhook server for the gatekeeper bot
//!
//! One POST endpoint on a token-derived path. The response is a fixed
//! `200 OK` body regardless of what routing did with the update; any other
//! method on the path is rejected with 403.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    routing::any,
};
use tracing::{info, warn};

use tg_api::{BotApi, Update};

use crate::error::Result;
use crate::handler::GateHandler;

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<GateHandler>,
}

/// The callback path for a bot token. The token is the secret that guards
/// the endpoint, so the full path must stay out of logs.
pub fn webhook_path(token: &str) -> String {
    format!("/webhook/{token}")
}

/// Create the webhook router.
pub fn create_webhook_router(path: &str, state: WebhookState) -> Router {
    Router::new()
        .route(path, any(handle_webhook))
        .with_state(Arc::new(state))
}

/// Handle one inbound callback.
async fn handle_webhook(
    State(state): State<Arc<WebhookState>>,
    method: Method,
    body: Bytes,
) -> (StatusCode, &'static str) {
    if method != Method::POST {
        return (StatusCode::FORBIDDEN, "Forbidden");
    }

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => state.handler.handle_update(update).await,
        Err(e) => warn!("ignoring malformed update payload: {e}"),
    }

    (StatusCode::OK, "OK")
}

/// Clear any stale webhook registration and point Telegram at the derived
/// public callback URL.
pub async fn register_webhook(api: &BotApi, public_url: &str, token: &str) -> Result<()> {
    api.delete_webhook(true).await?;

    let callback = format!("{}{}", public_url.trim_end_matches('/'), webhook_path(token));
    api.set_webhook(&callback).await?;

    info!("webhook registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_path_embeds_token() {
        assert_eq!(webhook_path("123456:TEST"), "/webhook/123456:TEST");
    }
}
