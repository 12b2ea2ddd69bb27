//! tg-api: Telegram Bot API client
//!
//! Shared wire types and a thin reqwest-based client used by both bot flows.
//! Covers the handful of Bot API methods the gateway needs: sendMessage,
//! getUpdates, setWebhook and deleteWebhook.

pub mod client;
pub mod error;
pub mod types;

pub use client::BotApi;
pub use error::{ApiError, Result};
pub use types::{ApiResponse, Chat, Message, Update, User};
