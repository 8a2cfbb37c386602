#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;

use std::env;
use std::fs;
use std::path;

use anyhow::Context;
use anyhow::Result;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::WorkerGuard;

pub const LOG_FILE_NAME: &str = "debug.log";

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("PROMPTSMITH_LOG_DIR") {
        if !dir.is_empty() {
            return path::PathBuf::from(dir);
        }
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("promptsmith");
}

pub fn is_enabled(rust_log: &str) -> bool {
    return rust_log.contains("promptsmith");
}

/// The appender panics when it can't open its file, so the directory and file
/// are created here first and failures come back as errors.
pub fn file_writer(dir: &path::Path) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| return format!("Unable to create log directory {}", dir.display()))?;

    let log_path = dir.join(LOG_FILE_NAME);
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| return format!("Unable to open log file {}", log_path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    return Ok(tracing_appender::non_blocking(file_appender));
}

/// Installs the JSON file logger when RUST_LOG mentions promptsmith. Nothing
/// touches disk otherwise. Lines are flushed when the returned guard drops.
pub fn init() -> Result<Option<WorkerGuard>> {
    let rust_log = env::var("RUST_LOG").unwrap_or_default();
    if !is_enabled(&rust_log) {
        return Ok(None);
    }

    let (writer, guard) = file_writer(&log_dir())?;
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(writer)
        .init();

    return Ok(Some(guard));
}
