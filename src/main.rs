// kftray-ui - Terminal component kit for port-forward management
//
// A gallery binary that mounts every component of the kit against live
// state: clipboard copy controls with self-expiring "Copied" feedback, a
// port-forward table with start/stop/delete/edit, and the smaller inputs
// and indicators.
//
// Architecture:
// - Clipboard (arboard): copy controller, indicator and trigger, one timer arena
// - Shell bridge (rfd + tokio::fs): version, file dialogs, file I/O, notifications
// - TUI (ratatui): components and the gallery event loop
// - Logging (tracing): in-memory ring for the log strip, optional JSON files

mod cli;
mod clipboard;
mod config;
mod logging;
mod shell;
mod theme;
mod tui;

use anyhow::{Context, Result};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::components::{parse_records, PortForwardRecord};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path, version)
    // If a command was handled, exit early
    let Some(cli) = cli::handle_cli().await else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Logs go to the in-memory buffer so they don't garble the display
    let log_buffer = LogBuffer::new();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("kftray_ui={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
                None
            } else {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Non-blocking writer: writes happen on a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();

                Some(guard)
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    let records = match &cli.configs {
        Some(path) => load_records(path)?,
        None => tui::app::sample_records(),
    };

    tracing::debug!(
        "Theme '{}', copy feedback {}ms",
        config.theme,
        config.clipboard.reset_ms
    );

    tui::run_gallery(config, log_buffer, records).await
}

/// Read a kftray JSON export given with `--configs`
fn load_records(path: &Path) -> Result<Vec<PortForwardRecord>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configs from {}", path.display()))?;
    parse_records(&json)
        .with_context(|| format!("Failed to parse configs in {}", path.display()))
}
