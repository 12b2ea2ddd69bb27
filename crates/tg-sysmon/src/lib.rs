//! tg-sysmon: long-polling host metrics bot
//!
//! Polls Telegram for updates and answers `/info` and `/status` with host
//! system reports. A background heartbeat task logs a periodic liveness
//! line. Unlike the gatekeeper flow, no allowlist is applied here: every
//! sender can query the host.

pub mod bot;
pub mod config;
pub mod error;
pub mod handler;
pub mod heartbeat;
pub mod metrics;
pub mod poller;

pub use bot::SysmonBot;
pub use config::SysmonConfig;
pub use error::{Result, SysmonError};
pub use handler::ReportHandler;
pub use poller::Poller;
