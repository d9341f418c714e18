//! File logging for CLI runs.
//!
//! Logging is off unless `--log-file` is given. Generation fans hue sets
//! out over rayon workers, so records carry thread ids to keep interleaved
//! hue sets apart.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log file name when none is given.
pub const DEFAULT_LOG_FILE: &str = "shadesmith.log";

/// Level used when `--log-level` is absent or unparseable.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a full filter directive, e.g.
/// `shadesmith::extrapolate=trace,shadesmith=info`.
pub const LOG_ENV: &str = "SHADESMITH_LOG";

/// Filter for this crate's records.
///
/// A directive in [`LOG_ENV`] wins over `level`. An invalid `level` falls
/// back to [`DEFAULT_LOG_LEVEL`] rather than failing the run.
pub fn log_filter(level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    let level = level.unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(format!("shadesmith={level}"))
        .unwrap_or_else(|_| EnvFilter::new(format!("shadesmith={DEFAULT_LOG_LEVEL}")))
}

/// Initialize tracing with file output.
///
/// Returns a guard that must be held until exit; dropping it flushes the
/// non-blocking writer. Debug builds also record span enter/close events
/// for the instrumented hue-set generator.
pub fn init_logging(log_path: Option<&Path>, level: Option<&str>) -> WorkerGuard {
    let log_path = log_path.unwrap_or(Path::new(DEFAULT_LOG_FILE));
    let directory = log_path.parent().unwrap_or(Path::new("."));
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(log_filter(level))
        .with(file_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %log_path.display(),
        "logging started"
    );

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_scopes_filter_to_crate() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert!(log_filter(Some("debug")).to_string().contains("shadesmith=debug"));
    }

    #[test]
    fn invalid_level_falls_back_to_default() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert!(log_filter(Some("loud")).to_string().contains("shadesmith=info"));
        assert!(log_filter(None).to_string().contains("shadesmith=info"));
    }
}
