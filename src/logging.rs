// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - File logging for the playground (the terminal belongs to the TUI)

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Flushes the log file when dropped. Keep it alive until exit.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Sends `tracing` output to `<dir>/hotkeys.log`. Level defaults to info;
/// override with RUST_LOG (e.g. `RUST_LOG=hotkeys=trace`).
pub fn init(dir: &Path) -> Result<LoggingGuard> {
    let log_path = dir.join("hotkeys.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let (writer, file_guard) = tracing_appender::non_blocking(file);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(log_path = %log_path.display(), "logging initialized");

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
