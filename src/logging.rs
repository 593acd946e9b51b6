use crate::error::{OutlineError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_NAME: &str = "outline.log";

/// Keeps the background log writer alive; logs flush when it drops.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// `$XDG_STATE_HOME/outline-notes`, then `~/.local/state/outline-notes`,
/// then the temp dir.
pub fn default_log_dir() -> PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(state).join("outline-notes");
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("outline-notes");
    }
    std::env::temp_dir().join("outline-notes")
}

/// Install a file-backed subscriber. The terminal belongs to the editor, so
/// nothing is written to stdout or stderr.
///
/// `RUST_LOG` overrides `level` when set.
pub fn init(level: &str, log_dir: &Path) -> Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("outline_notes={level},outline={level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| OutlineError::Logging(e.to_string()))?;

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Ok(LoggingGuard { _guard: guard })
}
