//! Sysmon configuration

use std::time::Duration;

use crate::error::{Result, SysmonError};

const DEFAULT_HEARTBEAT_SECS: u64 = 1800;

/// Configuration for the polling monitor bot.
#[derive(Debug, Clone)]
pub struct SysmonConfig {
    /// Bot API token for the monitor bot.
    pub telegram_token: String,
    /// Interval between heartbeat log lines.
    pub heartbeat_interval: Duration,
}

impl SysmonConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `TELEGRAM_TOKEN`. Optional: `HEARTBEAT_INTERVAL_SECS`
    /// (default 1800).
    pub fn from_env() -> Result<Self> {
        let telegram_token = std::env::var("TELEGRAM_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SysmonError::Config("TELEGRAM_TOKEN not set".to_string()))?;

        let heartbeat_interval = std::env::var("HEARTBEAT_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_HEARTBEAT_SECS));

        Ok(Self {
            telegram_token,
            heartbeat_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("TELEGRAM_TOKEN");
            std::env::remove_var("HEARTBEAT_INTERVAL_SECS");
        }
    }

    #[test]
    #[serial]
    fn test_missing_token_fails() {
        clear_env();

        let result = SysmonConfig::from_env();
        assert!(matches!(result, Err(SysmonError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("TELEGRAM_TOKEN", "123456:TEST");
        }

        let config = SysmonConfig::from_env().unwrap();
        assert_eq!(config.heartbeat_interval, Duration::from_secs(1800));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_heartbeat_override() {
        clear_env();
        unsafe {
            std::env::set_var("TELEGRAM_TOKEN", "123456:TEST");
            std::env::set_var("HEARTBEAT_INTERVAL_SECS", "60");
        }

        let config = SysmonConfig::from_env().unwrap();
        assert_eq!(config.heartbeat_interval, Duration::from_secs(60));

        clear_env();
    }
}
