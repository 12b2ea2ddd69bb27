//! tg-gateway: Telegram bot gateway main binary
//!
//! Runs exactly one of the two independent bot flows:
//!
//!   tg-gateway gatekeeper  - webhook access-gating bot
//!   tg-gateway sysmon      - long-polling host metrics bot
//!   tg-gateway --help      - show help

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use tg_gatekeeper::{GatekeeperBot, GatekeeperConfig};
use tg_sysmon::{SysmonBot, SysmonConfig};

/// Run mode
enum RunMode {
    /// Webhook gatekeeper bot
    Gatekeeper,
    /// Long-polling monitor bot
    Sysmon,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("tg-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Broadcast ctrl-c as the shutdown signal for whichever flow runs.
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            let _ = shutdown_tx.send(());
        }
    });

    match mode {
        RunMode::Gatekeeper => {
            let config = GatekeeperConfig::from_env()
                .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

            tracing::info!("Starting gatekeeper bot...");
            let bot = GatekeeperBot::new(config)?;
            bot.run(shutdown_rx).await?;
        }
        RunMode::Sysmon => {
            let config = SysmonConfig::from_env()
                .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

            tracing::info!("Starting sysmon bot...");
            let bot = SysmonBot::new(config)?;
            bot.run(shutdown_rx).await?;
        }
        _ => {}
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "gatekeeper" => return RunMode::Gatekeeper,
            "sysmon" => return RunMode::Sysmon,
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Help
}

/// Print help message
fn print_help() {
    println!("tg-gateway - Telegram bot gateway");
    println!();
    println!("Usage:");
    println!("  tg-gateway gatekeeper   Start the webhook access-gating bot");
    println!("  tg-gateway sysmon       Start the long-polling host metrics bot");
    println!("  tg-gateway --help       Show this help message");
    println!("  tg-gateway --version    Show version");
    println!();
    println!("Environment Variables (gatekeeper):");
    println!("  BOT_TOKEN               Bot API token (required)");
    println!("  PUBLIC_URL              Public base URL for the webhook (required)");
    println!("  OWNER_ID                Numeric owner user id (required)");
    println!("  ALLOWED_USERS           Comma-separated seed handles (optional)");
    println!("  PORT                    Webhook server port (default: 10000)");
    println!("  ALLOWED_FILE            Allowlist snapshot path (default: allowed.json)");
    println!();
    println!("Environment Variables (sysmon):");
    println!("  TELEGRAM_TOKEN          Bot API token (required)");
    println!("  HEARTBEAT_INTERVAL_SECS Heartbeat log interval (default: 1800)");
}
