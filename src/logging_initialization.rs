use anyhow::{Context, Result};
use cfsync_common::environment::{
    get_env_var,
    variables::{LOG_DIR, LOG_FILTER},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "cfsync.log";

/// Set up logging, reading the filter configuration from the environment or defaulting to info
/// logs and above. When a log directory is configured, logs are also written to a daily rolling
/// file there; the returned guard flushes that file and must be held until shutdown.
pub fn initialize_logging() -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match get_env_var(LOG_DIR) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the logging subscriber.")?;
    LogTracer::init().context("Failed to forward log records to tracing.")?;

    Ok(guard)
}
