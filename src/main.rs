// termscreen - scrolling log screen with gesture-driven emergency stop
//
// Runs the terminal screen of a small scanner device on a desktop terminal.
//
// Architecture:
// - Terminal core: bounded text buffer, scroll navigation, gesture guard
// - Host (ratatui): draws the device screen, turns clicks/keys into input
// - Logging: tracing, with an optional layer mirroring logs onto the screen
// - Demo: mock scanner output streamed over a channel

mod cli;
mod config;
mod demo;
mod host;
mod logging;
mod terminal;

use anyhow::Result;
use config::{Config, LogRotation};
use host::HostChannels;
use logging::{LogHook, ScreenLogLayer, CAPTURE_CHANNEL_SIZE};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Initialize tracing. Nothing goes to stdout: it would garble the screen.
    // - Screen layer: inert until the terminal view installs the hook
    // - File layer: optional JSON logs with rotation
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let hook = LogHook::new();
    let default_filter = format!("termscreen={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        match file_writer(&config) {
            Some((non_blocking, guard)) => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(ScreenLogLayer::new(hook.clone()))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();
                Some(guard)
            }
            None => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(ScreenLogLayer::new(hook.clone()))
                    .init();
                None
            }
        };

    tracing::debug!(
        "Config: height={} capture_to_screen={} demo={}",
        config.display.height,
        config.logging.capture_to_screen,
        config.demo_mode
    );

    // Lines for the screen: log capture and demo producer share one channel.
    // Commands: dispatcher -> background tasks.
    let (lines_tx, lines_rx) = mpsc::channel(CAPTURE_CHANNEL_SIZE);
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();

    let demo_handle = if config.demo_mode {
        tracing::info!("Running in DEMO MODE - streaming mock scanner output");
        let demo_lines = lines_tx.clone();
        Some(tokio::spawn(async move {
            demo::run_demo(demo_lines, commands_rx).await;
        }))
    } else {
        drop(commands_rx);
        None
    };

    let channels = HostChannels {
        lines_tx,
        lines_rx,
        commands_tx,
    };

    if let Err(e) = host::run_host(config, hook, channels).await {
        tracing::error!("Screen error: {:?}", e);
        eprintln!("Error: {:?}", e);
    }

    if let Some(handle) = demo_handle {
        handle.abort();
    }

    Ok(())
}

/// Build the rolling file writer when file logging is enabled
fn file_writer(
    config: &Config,
) -> Option<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    if !config.logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.logging.file_dir, e
        );
        return None;
    }

    let dir = &config.logging.file_dir;
    let prefix = &config.logging.file_prefix;
    let file_appender = match config.logging.file_rotation {
        LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
        LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
        LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
    };

    // Non-blocking writer: writes happen on a background thread
    Some(tracing_appender::non_blocking(file_appender))
}
