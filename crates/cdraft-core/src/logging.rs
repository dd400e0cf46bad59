//! Logging configuration using tracing

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Base name of the daily log file
const LOG_FILE_PREFIX: &str = "cdraft.log";

/// Filter used when `CDRAFT_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "cdraft=info,complaint_drafter=info,cdraft_app=info,cdraft_core=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/complaint-drafter/logs/`. Stdout is
/// left alone because the headless runner writes NDJSON events there.
/// Log level is controlled by the `CDRAFT_LOG` environment variable.
///
/// # Examples
/// ```bash
/// CDRAFT_LOG=debug cdraft
/// CDRAFT_LOG=cdraft_app=trace cdraft
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env("CDRAFT_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Complaint Drafter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Record where settings came from and where drafts will be written
///
/// Called once settings are resolved, after [`init`].
pub fn log_session(config_source: &str, export_dir: &Path) {
    tracing::info!("Settings: {}", config_source);
    tracing::info!("Drafts directory: {}", export_dir.display());
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("complaint-drafter").join("logs"))
}

/// File name the daily appender uses for `date`
fn log_file_name(date: NaiveDate) -> String {
    format!("{LOG_FILE_PREFIX}.{}", date.format("%Y-%m-%d"))
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join(log_file_name(chrono::Local::now().date_naive())))
}
