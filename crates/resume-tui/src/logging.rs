use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "resume-viewer.log";

/// Default log location: `<cache_dir>/resume-viewer/resume-viewer.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("resume-viewer").join(LOG_FILE))
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is written to stdout/stderr. Returns `None` (logging disabled)
/// if the log directory cannot be created.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes pending lines.
pub fn init_logging(path: &Path) -> Option<WorkerGuard> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty())?;
    let file_name = path.file_name()?;
    std::fs::create_dir_all(dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .ok()?;

    tracing::info!("resume-tui v{} starting", env!("CARGO_PKG_VERSION"));
    Some(guard)
}
