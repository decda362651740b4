// src/logging.rs
//
// The terminal is in raw mode while the editor runs, so log lines go to a
// file instead of stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "vedit.log";

/// Installs the global subscriber writing to `dir/vedit.log`. Keep the
/// returned guard alive until exit or buffered lines are lost. Returns
/// `None` if a subscriber was already installed.
pub fn init(dir: &Path, filter: &str) -> std::io::Result<Option<WorkerGuard>> {
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("vedit=info"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        Err(_) => Ok(None),
    }
}
