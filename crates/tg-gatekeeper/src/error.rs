//! Error types for tg-gatekeeper

use thiserror::Error;

/// tg-gatekeeper error type
#[derive(Error, Debug)]
pub enum GatekeeperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Telegram API error: {0}")]
    Api(#[from] tg_api::ApiError),

    #[error("Webhook server error: {0}")]
    Server(String),
}

/// Result type alias for tg-gatekeeper
pub type Result<T> = std::result::Result<T, GatekeeperError>;
