//! Structured logging setup with tracing

use once_cell::sync::OnceCell;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log files are named `<prefix>.<date>.log`
const LOG_FILE_PREFIX: &str = "icon_gallery";

const LOG_FILE_SUFFIX: &str = "log";

/// Flushes the file writer when the process exits
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialize the logging system: console on stderr plus a daily JSON file
/// in `log_dir`. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    if FILE_GUARD.set(guard).is_err() {
        anyhow::bail!("Logging already initialized");
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to command output
    #[cfg(debug_assertions)]
    let console = fmt::layer().pretty().with_writer(std::io::stderr);

    #[cfg(not(debug_assertions))]
    let console = fmt::layer().compact().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(fmt::layer().json().with_writer(non_blocking))
        .try_init()?;

    tracing::info!("Logging initialized in {}", log_dir.display());
    Ok(())
}

/// Delete log files in `log_dir` older than `days`. Returns how many were
/// removed; a missing directory removes nothing.
pub fn cleanup_old_logs(log_dir: &Path, days: u32) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let threshold = SystemTime::now()
        .checked_sub(Duration::from_secs(u64::from(days) * 24 * 60 * 60))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let mut deleted = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().map_or(true, |ext| ext != LOG_FILE_SUFFIX) {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified());
        if matches!(modified, Ok(time) if time < threshold) && std::fs::remove_file(&path).is_ok() {
            deleted += 1;
            tracing::debug!("Deleted old log: {:?}", path);
        }
    }

    tracing::info!("Cleaned up {} old log files", deleted);
    Ok(deleted)
}
