use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "groupstudy.log";

/// Routes `tracing` output to a log file in the config directory; the
/// terminal itself belongs to the UI. Keep the returned guard alive for the
/// lifetime of the program so buffered lines are flushed.
pub fn init(default_level: &str) -> Result<WorkerGuard> {
    let dir = crate::config::config_dir()?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init();

    Ok(guard)
}
