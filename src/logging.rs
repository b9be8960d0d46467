//! Tracing setup: console plus a daily-rotated log file.

use std::path::Path;
use std::sync::OnceLock;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagebrief_config::{ConfigLoader, LoggingConfig};

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize logging. `RUST_LOG` wins over the configured level.
///
/// If the log directory is unusable, logging continues on the console
/// only and a warning is emitted once the subscriber is installed.
pub(crate) fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_dir = ConfigLoader::expand_path(&config.dir);

    let (file_layer, file_error) = match file_appender(&log_dir) {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let _ = GUARD.set(guard);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                None,
            )
        }
        Err(e) => (None, Some(e)),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console output goes to stderr; stdout carries results.
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()?;

    if let Some(e) = file_error {
        warn!(dir = %log_dir.display(), error = %e, "Log file unavailable, logging to console only");
    }
    Ok(())
}

fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pagebrief")
        .filename_suffix("log")
        .max_log_files(14)
        .build(log_dir)?;
    Ok(appender)
}
