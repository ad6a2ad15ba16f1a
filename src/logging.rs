//! Logging setup for the command-line binary.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with `verbose`.
/// With `log_file`, output is appended to that file through a non-blocking writer and the
/// returned guard must be held until exit.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(log_path) = log_file {
        match std::fs::OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .init();
                tracing::debug!(path = %log_path.display(), "logging initialized");
                return Some(guard);
            }
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .without_time()
                    .init();
                tracing::warn!(error = %e, "failed to open log file; logging to the console");
                return None;
            }
        }
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).without_time().init();
    None
}
