//! Command router for the gatekeeper bot
//!
//! Authorization is decided fresh on every message; there is no session
//! memory. One handler instance is built at startup and shared by the
//! webhook server.

use std::sync::Mutex;

use tg_api::{BotApi, Update, User};
use tracing::{debug, error, info, warn};

use crate::allowlist::Allowlist;

const DENIED_REPLY: &str = "You are not allowed to use this bot.";
const WELCOME_REPLY: &str =
    "Welcome! Use /allow @username to grant access (owner only).";
const OWNER_ONLY_REPLY: &str = "Only the owner can grant access.";
const USAGE_REPLY: &str = "Usage: /allow @username";
const FORMAT_REPLY: &str = "The handle must start with @. Example: /allow @alice";

/// Routes webhook updates to the `/start` and `/allow` handlers.
pub struct GateHandler {
    api: BotApi,
    owner_id: i64,
    allowlist: Mutex<Allowlist>,
}

impl GateHandler {
    pub fn new(api: BotApi, allowlist: Allowlist) -> Self {
        Self {
            api,
            owner_id: allowlist.owner_id(),
            allowlist: Mutex::new(allowlist),
        }
    }

    /// Route one update and send the reply, if any. Send failures are logged
    /// and swallowed; the webhook response does not depend on them.
    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            debug!(update_id = update.update_id, "skipping update without message");
            return;
        };
        let Some(from) = message.from.as_ref() else {
            return;
        };
        let Some(text) = message.text.as_deref() else {
            return;
        };

        if let Some(reply) = self.respond(from, text) {
            if let Err(e) = self.api.send_message(message.chat.id, &reply).await {
                error!(chat_id = message.chat.id, "failed to send reply: {e}");
            }
        }
    }

    /// Compute the reply for a message, mutating the allowlist when a grant
    /// succeeds. Returns `None` for anything but the two known commands.
    fn respond(&self, from: &User, text: &str) -> Option<String> {
        let (command, arg) = split_command(text)?;

        match command {
            "/start" => Some(self.start_reply(from)),
            "/allow" => Some(self.allow_reply(from, arg)),
            other => {
                debug!(command = other, "unrecognized command");
                None
            }
        }
    }

    fn start_reply(&self, from: &User) -> String {
        let handle = from.handle();
        let allowed = self
            .allowlist
            .lock()
            .unwrap()
            .is_allowed(handle.as_deref(), from.id);

        if allowed {
            WELCOME_REPLY.to_string()
        } else {
            DENIED_REPLY.to_string()
        }
    }

    fn allow_reply(&self, from: &User, arg: Option<&str>) -> String {
        // Stricter gate than is_allowed: only the owner's numeric id may
        // grant, regardless of allowlist membership.
        if from.id != self.owner_id {
            return OWNER_ONLY_REPLY.to_string();
        }

        let Some(handle) = arg else {
            return USAGE_REPLY.to_string();
        };
        if !handle.starts_with('@') {
            return FORMAT_REPLY.to_string();
        }

        let persisted = self.allowlist.lock().unwrap().grant(handle);
        if !persisted {
            warn!(handle, "grant applied in memory but snapshot not persisted");
        }
        info!(handle, "access granted");

        format!("Access granted to {handle}.")
    }
}

/// Split a message into its command token (bot-name suffix stripped) and the
/// first argument. Non-command text yields `None`.
fn split_command(text: &str) -> Option<(&str, Option<&str>)> {
    let mut parts = text.split_whitespace();
    let head = parts.next()?;

    if !head.starts_with('/') {
        return None;
    }

    let command = head.split('@').next().unwrap_or(head);
    Some((command, parts.next()))
}
