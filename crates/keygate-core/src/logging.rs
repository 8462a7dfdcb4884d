//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so interactive sessions log to a daily-rolling
//! file under `<home>/logs`. One-shot commands log to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directives are read from this variable (e.g. `keygate_core=debug`).
pub const LOG_ENV: &str = "KEYGATE_LOG";

const LOG_FILE_PREFIX: &str = "keygate.log";

#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Daily-rolling file in this directory.
    File(PathBuf),
}

/// Keeps the background writer alive; drop it only at process exit.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(target: LogTarget, default_directive: &str) -> Result<LogGuard> {
    let filter = env_filter(default_directive);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(LogGuard { _worker: None })
        }
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(LogGuard {
                _worker: Some(worker),
            })
        }
    }
}
