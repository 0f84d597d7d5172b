//! Logging initialization.
//!
//! The server logs to stderr; the TUI logs to a file under
//! `${ROSTER_HOME}/logs` so tracing output never corrupts the alternate
//! screen.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes stderr logging for the server process.
pub fn init_server() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Initializes file logging for the TUI process.
///
/// The returned guard flushes the writer on drop; hold it for the lifetime
/// of the session.
pub fn init_tui() -> Result<WorkerGuard> {
    let dir = roster_core::config::paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, "roster.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
