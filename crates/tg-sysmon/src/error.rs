//! Error types for tg-sysmon

use thiserror::Error;

/// tg-sysmon error type
#[derive(Error, Debug)]
pub enum SysmonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Telegram API error: {0}")]
    Api(#[from] tg_api::ApiError),
}

/// Result type alias for tg-sysmon
pub type Result<T> = std::result::Result<T, SysmonError>;
