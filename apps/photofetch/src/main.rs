//! photofetch - download check for the photo viewer's images
//!
//! Runs each case through the download harness against the real network and
//! reports which photos arrived within the timeout.

mod cli;
mod display;
mod error;
mod logging;

use crate::cli::{Cli, ColorChoice};
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use photofetch_config::Config;
use photofetch_events::EventReceiver;
use photofetch_harness::{DownloadCase, DownloadHarness, HarnessOptions, HttpFetcher};
use photofetch_net::{NetClient, NetConfig};
use std::process;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.json;

    init_tracing(json_mode, cli.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode || !matches!(e, CliError::CasesFailed { .. }) {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting photofetch v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli)?;

    let cases: Vec<DownloadCase> = if cli.urls.is_empty() {
        config
            .harness
            .cases_or_samples()
            .into_iter()
            .map(DownloadCase::from)
            .collect()
    } else {
        cli.urls.iter().map(DownloadCase::from_url).collect()
    };

    let (event_sender, event_receiver) = photofetch_events::channel();
    let event_task = tokio::spawn(log_events(event_receiver));

    let client = NetClient::new(NetConfig::from(&config.network))?;
    let harness = DownloadHarness::with_options(
        HttpFetcher::new(client).with_events(event_sender.clone()),
        HarnessOptions::from(&config.harness),
    )
    .with_events(event_sender);

    let report = harness.run_all(&cases).await;

    // Closing every sender lets the logging task drain and finish
    drop(harness);
    if tokio::time::timeout(Duration::from_secs(1), event_task)
        .await
        .is_err()
    {
        warn!("event log did not drain before exit");
    }

    let colors = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    };
    OutputRenderer::new(cli.json, colors).render_report(&report)?;

    if report.is_success() {
        info!("All downloads completed");
        Ok(())
    } else {
        Err(CliError::CasesFailed {
            failed: report.failed(),
            total: report.results.len(),
        })
    }
}

async fn log_events(mut receiver: EventReceiver) {
    while let Some(message) = receiver.recv().await {
        logging::log_event_with_tracing(&message);
    }
}

/// Apply CLI flags on top of file and environment configuration
fn apply_cli_config(config: &mut Config, cli: &Cli) -> Result<(), CliError> {
    if let Some(timeout) = cli.timeout {
        if timeout == 0 {
            return Err(CliError::InvalidArguments(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        config.harness.timeout_secs = timeout;
    }

    if let Some(retries) = cli.retries {
        config.network.retries = retries;
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = Config::log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "photofetch-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| {
                                tracing_subscriber::EnvFilter::new(
                                    "info,photofetch=debug,photofetch_harness=debug,photofetch_net=debug",
                                )
                            },
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                    )
                    .init();
            }
        }
    } else if json_mode {
        // JSON mode: keep stdout clean for the report
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}
