//! Command router for the monitor bot
//!
//! Dispatch is on the full normalized message text. Every sender may invoke
//! these commands; unlike the gatekeeper flow, no allowlist check is
//! applied here.

use tg_api::BotApi;
use tracing::{debug, error};

use crate::metrics;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const UNRECOGNIZED_REPLY: &str =
    "❌ Command not recognized.\n\nUse /info for a full report or /status for a quick check.";

/// Recognized monitor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Info,
    Status,
    Other,
}

impl Command {
    /// Parse the trimmed, lower-cased message text.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "/start" => Command::Start,
            "/info" => Command::Info,
            "/status" => Command::Status,
            _ => Command::Other,
        }
    }
}

/// Answers monitor commands with metrics reports.
pub struct ReportHandler {
    api: BotApi,
}

impl ReportHandler {
    pub fn new(api: BotApi) -> Self {
        Self { api }
    }

    /// Route one message and send the reply. Send failures are logged and
    /// swallowed; the poll loop keeps going either way.
    pub async fn handle_message(&self, chat_id: i64, text: &str) {
        debug!(chat_id, text, "processing message");

        let reply = match Command::parse(text) {
            Command::Start => start_reply(),
            Command::Info => metrics::detailed_report().await,
            Command::Status => metrics::quick_status(),
            Command::Other => UNRECOGNIZED_REPLY.to_string(),
        };

        if let Err(e) = self.api.send_message(chat_id, &reply).await {
            error!(chat_id, "failed to send reply: {e}");
        }
    }
}

fn start_reply() -> String {
    format!(
        "🤖 *tg-sysmon v{VERSION}*\n\n\
         *Commands:*\n\
         • `/info` — full server report\n\
         • `/status` — quick status"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/info"), Command::Info);
        assert_eq!(Command::parse("/status"), Command::Status);
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(Command::parse("  /INFO  "), Command::Info);
        assert_eq!(Command::parse("/Status\n"), Command::Status);
    }

    #[test]
    fn test_parse_unknown_text() {
        assert_eq!(Command::parse("hello"), Command::Other);
        assert_eq!(Command::parse("/info now"), Command::Other);
        assert_eq!(Command::parse(""), Command::Other);
    }

    #[test]
    fn test_start_reply_lists_commands() {
        let reply = start_reply();
        assert!(reply.contains("/info"));
        assert!(reply.contains("/status"));
    }
}
