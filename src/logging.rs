//! File logging for the board process.
//!
//! The terminal belongs to the board while it runs, so logs only go to a
//! daily rolling file under `<board>/logs/`.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rolling log.
const LOG_FILE: &str = "taskwatch.log";

/// Keeps the background log writer alive. Pending lines are flushed when it
/// is dropped.
#[must_use = "logs are lost if the guard is dropped early"]
pub struct LogGuard {
    _file_guard: WorkerGuard,
}

/// Installs the global subscriber writing to `log_dir`.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// when `verbose` is set.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(log_dir: &Path, verbose: bool) -> anyhow::Result<LogGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "taskwatch={level},taskwatch_store={level},taskwatch_tui={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");
    Ok(LogGuard { _file_guard: guard })
}
