use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info, warn};

use restock_watcher::state::StateStore;
use restock_watcher::{AppConfig, Watcher};

/// Checks one product page and alerts when it comes back in stock.
#[derive(Debug, Parser)]
#[command(name = "restock-watcher", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one availability check (default)
    Check,
    /// Print the last persisted status
    Status,
    /// Send a test message through every configured channel
    TestNotify,
}

/// Exit code when the page could not be checked at all.
const EXIT_CHECK_FAILED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // A missing .env file is normal in scheduled deployments.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("restock_watcher=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Ok(ExitCode::from(EXIT_CHECK_FAILED));
        }
    };

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => run_check(&config).await,
        Command::Status => show_status(&config),
        Command::TestNotify => test_notify(&config).await,
    }
}

fn build_watcher(config: &AppConfig) -> Option<Watcher> {
    match Watcher::from_config(config) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            error!("Failed to initialize watcher: {}", e);
            None
        }
    }
}

async fn run_check(config: &AppConfig) -> Result<ExitCode> {
    let Some(watcher) = build_watcher(config) else {
        return Ok(ExitCode::from(EXIT_CHECK_FAILED));
    };

    let code = match watcher.run().await {
        Ok(report) => report.exit_code(),
        Err(e) => e.exit_code(),
    };
    Ok(ExitCode::from(code))
}

fn show_status(config: &AppConfig) -> Result<ExitCode> {
    let store = StateStore::new(&config.state_file);
    match store.load() {
        Some(record) => {
            let observed = record
                .observed_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown time".to_string());
            println!("{} (observed {})", record.status, observed);
        }
        None => println!("no prior status in {}", store.path().display()),
    }
    Ok(ExitCode::SUCCESS)
}

async fn test_notify(config: &AppConfig) -> Result<ExitCode> {
    let Some(watcher) = build_watcher(config) else {
        return Ok(ExitCode::from(EXIT_CHECK_FAILED));
    };

    let enabled = watcher.notifier().enabled_channels();
    if enabled.is_empty() {
        warn!("No notification channel is configured");
        return Ok(ExitCode::SUCCESS);
    }
    info!("Sending test notification via {}", enabled.join(", "));

    let report = watcher.send_test_notification().await;
    for channel in &report.delivered {
        println!("{}: delivered", channel);
    }
    for channel in &report.failed {
        println!("{}: failed", channel);
    }

    if report.any_delivered() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_CHECK_FAILED))
    }
}
