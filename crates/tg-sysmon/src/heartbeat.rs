//! Background heartbeat task
//!
//! Logs a periodic liveness line. Shares no state with the poller and stops
//! when the shutdown signal fires.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Spawn the heartbeat task.
pub fn spawn(interval: Duration, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let started = Instant::now();
        info!(interval_secs = interval.as_secs(), "heartbeat started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    info!(
                        uptime_secs = started.elapsed().as_secs(),
                        "❤️ tg-sysmon v{VERSION} alive"
                    );
                }
                _ = shutdown.recv() => {
                    info!("heartbeat stopped");
                    break;
                }
            }
        }
    })
}
