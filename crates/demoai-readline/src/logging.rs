//! Log file setup.

use anyhow::{Context, Result};
use demoai_infrastructure::DemoPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Sends logs to a daily-rotated file under the logs directory.
///
/// The terminal is left to the shell. `RUST_LOG` overrides `default_level`.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(paths: &DemoPaths, default_level: &str) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "demoai.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}
