//! Process logging: stderr plus a dated log file, with retention cleanup.

use crate::config::LoggingConfig;
use crate::error::{DigestError, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Install the global subscriber and prune old log files.
///
/// Events go to stderr and to `vaultdigest_YYYY-MM-DD.log` in the configured
/// directory. The filter honors `RUST_LOG` and defaults to `info`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    fs::create_dir_all(&config.directory)?;

    let file_name = format!("vaultdigest_{}.log", Local::now().format("%Y-%m-%d"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.directory.join(file_name))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| DigestError::LoggingSetup(e.to_string()))?;

    cleanup_old_logs(&config.directory, config.retention_days);

    Ok(())
}

/// Delete `.log` files older than the retention period.
///
/// Cleanup failures are warnings; a stale log file never aborts a run.
fn cleanup_old_logs(directory: &Path, retention_days: i64) {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "could not read log directory {}: {}",
                directory.display(),
                e
            );
            return;
        }
    };

    let retention = Duration::from_secs(retention_days.max(0) as u64 * SECONDS_PER_DAY);
    let Some(cutoff) = SystemTime::now().checked_sub(retention) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map(|e| e == "log") != Some(true) {
            continue;
        }

        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };

        if modified < cutoff {
            match fs::remove_file(&path) {
                Ok(()) => info!("removed old log file: {}", path.display()),
                Err(e) => warn!("failed to remove old log file {}: {}", path.display(), e),
            }
        }
    }
}
