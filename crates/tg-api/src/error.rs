//! Error types for tg-api

use thiserror::Error;

/// tg-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error (code={code}): {description}")]
    Api { code: i64, description: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type alias for tg-api
pub type Result<T> = std::result::Result<T, ApiError>;
