//! Sysmon bot lifecycle
//!
//! Spawns the heartbeat, runs the poll loop, and tears both down on the
//! shutdown signal.

use tokio::sync::broadcast;
use tracing::info;

use tg_api::BotApi;

use crate::config::SysmonConfig;
use crate::error::Result;
use crate::handler::ReportHandler;
use crate::heartbeat;
use crate::poller::Poller;

/// Long-polling monitor bot.
pub struct SysmonBot {
    config: SysmonConfig,
    api: BotApi,
}

impl SysmonBot {
    pub fn new(config: SysmonConfig) -> Result<Self> {
        let api = BotApi::new(&config.telegram_token)?;
        Ok(Self { config, api })
    }

    /// Run until the shutdown signal fires.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let heartbeat = heartbeat::spawn(self.config.heartbeat_interval, shutdown.resubscribe());

        let poller = Poller::new(self.api.clone(), ReportHandler::new(self.api.clone()));

        tokio::select! {
            _ = poller.run() => {}
            _ = shutdown.recv() => {
                info!("sysmon shutting down");
            }
        }

        let _ = heartbeat.await;
        Ok(())
    }
}
