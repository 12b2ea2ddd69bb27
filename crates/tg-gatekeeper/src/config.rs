//! Gatekeeper configuration
//!
//! Read from environment variables (a `.env` file is loaded by the binary
//! before this runs). Missing required values abort startup.

use std::path::PathBuf;

use crate::error::{GatekeeperError, Result};

fn default_port() -> u16 {
    10000
}

fn default_allowlist_path() -> PathBuf {
    PathBuf::from("allowed.json")
}

/// Configuration for the webhook gatekeeper bot.
#[derive(Debug, Clone)]
pub struct GatekeeperConfig {
    /// Bot API token; also embedded in the webhook path.
    pub bot_token: String,
    /// Public base URL the webhook callback is registered under.
    pub public_url: String,
    /// Numeric user id that is always authorized and may grant access.
    pub owner_id: i64,
    /// Handles pre-allowed via the environment.
    pub seed_handles: Vec<String>,
    /// Port the webhook server binds to.
    pub port: u16,
    /// Path of the allowlist snapshot file.
    pub allowlist_path: PathBuf,
}

impl GatekeeperConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `BOT_TOKEN`, `PUBLIC_URL`, `OWNER_ID` (numeric).
    /// Optional: `ALLOWED_USERS` (comma-separated handles), `PORT`,
    /// `ALLOWED_FILE`.
    pub fn from_env() -> Result<Self> {
        let bot_token = require("BOT_TOKEN")?;
        let public_url = require("PUBLIC_URL")?;

        let owner_id = require("OWNER_ID")?.trim().parse::<i64>().map_err(|_| {
            GatekeeperError::Config("OWNER_ID must be a numeric Telegram user id".to_string())
        })?;

        let seed_handles = std::env::var("ALLOWED_USERS")
            .map(|raw| parse_seed(&raw))
            .unwrap_or_default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);

        let allowlist_path = std::env::var("ALLOWED_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_allowlist_path());

        Ok(Self {
            bot_token,
            public_url,
            owner_id,
            seed_handles,
            port,
            allowlist_path,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GatekeeperError::Config(format!("{name} not set")))
}

fn parse_seed(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "BOT_TOKEN",
            "PUBLIC_URL",
            "OWNER_ID",
            "ALLOWED_USERS",
            "PORT",
            "ALLOWED_FILE",
        ] {
            unsafe {
                std::env::remove_var(name);
            }
        }
    }

    #[test]
    #[serial]
    fn test_missing_required_vars_fail() {
        clear_env();

        let result = GatekeeperConfig::from_env();
        assert!(matches!(result, Err(GatekeeperError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_non_numeric_owner_fails() {
        clear_env();
        unsafe {
            std::env::set_var("BOT_TOKEN", "123456:TEST");
            std::env::set_var("PUBLIC_URL", "https://bot.example.com");
            std::env::set_var("OWNER_ID", "not-a-number");
        }

        let result = GatekeeperConfig::from_env();
        assert!(matches!(result, Err(GatekeeperError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_full_config() {
        clear_env();
        unsafe {
            std::env::set_var("BOT_TOKEN", "123456:TEST");
            std::env::set_var("PUBLIC_URL", "https://bot.example.com");
            std::env::set_var("OWNER_ID", "100");
            std::env::set_var("ALLOWED_USERS", "@alice, @bob ,,");
            std::env::set_var("PORT", "8443");
            std::env::set_var("ALLOWED_FILE", "/tmp/allowed.json");
        }

        let config = GatekeeperConfig::from_env().unwrap();
        assert_eq!(config.owner_id, 100);
        assert_eq!(config.seed_handles, vec!["@alice", "@bob"]);
        assert_eq!(config.port, 8443);
        assert_eq!(config.allowlist_path, PathBuf::from("/tmp/allowed.json"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("BOT_TOKEN", "123456:TEST");
            std::env::set_var("PUBLIC_URL", "https://bot.example.com");
            std::env::set_var("OWNER_ID", "100");
        }

        let config = GatekeeperConfig::from_env().unwrap();
        assert!(config.seed_handles.is_empty());
        assert_eq!(config.port, 10000);
        assert_eq!(config.allowlist_path, PathBuf::from("allowed.json"));

        clear_env();
    }
}
