//! Gatekeeper bot lifecycle
//!
//! Wires the allowlist, router and webhook server together and runs until
//! the shutdown signal fires.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use tg_api::BotApi;

use crate::allowlist::Allowlist;
use crate::config::GatekeeperConfig;
use crate::error::{GatekeeperError, Result};
use crate::handler::GateHandler;
use crate::webhook::{WebhookState, create_webhook_router, register_webhook, webhook_path};

/// Webhook gatekeeper bot.
pub struct GatekeeperBot {
    config: GatekeeperConfig,
    api: BotApi,
    handler: Arc<GateHandler>,
}

impl GatekeeperBot {
    /// Build the bot: API client, allowlist (env seed merged with the
    /// snapshot file) and one long-lived router.
    pub fn new(config: GatekeeperConfig) -> Result<Self> {
        let api = BotApi::new(&config.bot_token)?;

        let allowlist = Allowlist::load(
            config.owner_id,
            &config.seed_handles,
            config.allowlist_path.clone(),
        );
        let handler = Arc::new(GateHandler::new(api.clone(), allowlist));

        Ok(Self {
            config,
            api,
            handler,
        })
    }

    /// Register the webhook and serve until shutdown.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        register_webhook(&self.api, &self.config.public_url, &self.config.bot_token).await?;

        let state = WebhookState {
            handler: self.handler.clone(),
        };
        let app = create_webhook_router(&webhook_path(&self.config.bot_token), state);

        let addr = format!("0.0.0.0:{}", self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| GatekeeperError::Server(e.to_string()))?;

        info!("gatekeeper webhook server listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("gatekeeper shutting down");
            })
            .await
            .map_err(|e| GatekeeperError::Server(e.to_string()))?;

        Ok(())
    }
}
