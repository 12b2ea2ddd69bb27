//! Long-poll update loop
//!
//! One always-on loop: fetch a batch, route each message in arrival order,
//! advance the offset past the whole batch, sleep briefly, repeat. Poll
//! failures back off and leave the offset untouched so the batch is
//! refetched.

use std::time::Duration;

use tg_api::{BotApi, Update};
use tracing::{info, warn};

use crate::handler::ReportHandler;

/// Server-side long-poll wait.
const POLL_WAIT_SECS: u64 = 25;

/// Pause after a drained batch (or an empty one).
const IDLE_DELAY: Duration = Duration::from_secs(1);

/// Backoff after a failed poll.
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// The polling loop.
pub struct Poller {
    api: BotApi,
    handler: ReportHandler,
}

impl Poller {
    pub fn new(api: BotApi, handler: ReportHandler) -> Self {
        Self { api, handler }
    }

    /// Run forever. Termination is process shutdown; the caller selects
    /// against its shutdown signal.
    pub async fn run(&self) {
        let mut offset: Option<i64> = None;

        info!("polling for updates");

        loop {
            match self.api.get_updates(offset, POLL_WAIT_SECS).await {
                Ok(updates) => {
                    for update in &updates {
                        if let Some(message) = &update.message {
                            if let Some(text) = message.text.as_deref() {
                                self.handler.handle_message(message.chat.id, text).await;
                            }
                        }
                    }

                    offset = next_offset(offset, &updates);
                    tokio::time::sleep(IDLE_DELAY).await;
                }
                Err(e) => {
                    warn!(
                        "polling failed: {e}; retrying in {}s",
                        ERROR_BACKOFF.as_secs()
                    );
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }
}

/// Offset after draining a batch: one past the last update id, whether or
/// not the router understood the update. An empty batch keeps the current
/// offset.
fn next_offset(current: Option<i64>, batch: &[Update]) -> Option<i64> {
    batch.last().map(|u| u.update_id + 1).or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_update(update_id: i64) -> Update {
        Update {
            update_id,
            message: None,
        }
    }

    #[test]
    fn test_offset_advances_past_batch() {
        let batch: Vec<Update> = [5, 6, 7].into_iter().map(bare_update).collect();
        assert_eq!(next_offset(None, &batch), Some(8));
    }

    #[test]
    fn test_offset_advances_for_unrecognized_updates() {
        // Update 6 carries no message; its id still moves the offset.
        let batch = vec![
            Update {
                update_id: 5,
                message: None,
            },
            bare_update(6),
            bare_update(7),
        ];
        assert_eq!(next_offset(Some(5), &batch), Some(8));
    }

    #[test]
    fn test_empty_batch_keeps_offset() {
        assert_eq!(next_offset(Some(42), &[]), Some(42));
        assert_eq!(next_offset(None, &[]), None);
    }
}
