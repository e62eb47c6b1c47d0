//! Icon Gallery Logging & Observability Module
//!
//! Provides structured logging, panic handling, crash reports, and deadlock detection.

mod panic_hook;
mod logging;

pub use panic_hook::init_panic_hook;
pub use logging::{cleanup_old_logs, init_logging};

use std::path::PathBuf;
use directories::ProjectDirs;

/// Get the application log directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "IconGallery", "IconGallery")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize all observability features, then prune log files older
/// than `retention_days`
pub fn init(retention_days: u32) -> anyhow::Result<()> {
    let dir = log_dir();
    init_logging(&dir)?;
    init_panic_hook();

    #[cfg(debug_assertions)]
    init_deadlock_detector();

    if let Err(e) = cleanup_old_logs(&dir, retention_days) {
        tracing::warn!("Log cleanup failed: {}", e);
    }

    Ok(())
}

#[cfg(debug_assertions)]
fn init_deadlock_detector() {
    use std::thread;
    use std::time::Duration;

    let spawned = thread::Builder::new()
        .name("deadlock-detector".into())
        .spawn(|| loop {
            thread::sleep(Duration::from_secs(10));
            let deadlocks = parking_lot::deadlock::check_deadlock();
            if deadlocks.is_empty() {
                continue;
            }

            tracing::error!("{} deadlock(s) detected", deadlocks.len());
            for (i, threads) in deadlocks.iter().enumerate() {
                for t in threads {
                    tracing::error!(
                        "Deadlock #{} thread {:?}\n{:?}",
                        i,
                        t.thread_id(),
                        t.backtrace()
                    );
                }
            }
        });

    if let Err(e) = spawned {
        tracing::warn!("Deadlock detector not started: {}", e);
    }
}
