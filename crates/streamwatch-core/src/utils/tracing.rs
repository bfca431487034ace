use chrono::Local;
use std::io;
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

use super::paths::AppPaths;

/// Where log output goes. Stdout is never an option: the stdio MCP
/// transport owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// A timestamp-named file under the user data directory, falling back
    /// to stderr when no data directory exists.
    File,
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber. Filtering is configured via RUST_LOG.
///
/// Returns the log file path when logging to a file.
pub fn init_tracing(target: LogTarget) -> io::Result<Option<PathBuf>> {
    let log_dir = match target {
        LogTarget::File => AppPaths::log_dir(),
        LogTarget::Stderr => None,
    };

    if let Some(log_dir) = log_dir {
        std::fs::create_dir_all(&log_dir)?;

        let file_name = format!("{}.log", Local::now().format("%Y%m%d_%H%M%S"));
        let file_appender = rolling::never(&log_dir, &file_name);

        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::Layer::new()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter());

        tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

        let path = log_dir.join(file_name);
        tracing::debug!(
            target: "streamwatch::utils::tracing",
            path = %path.display(),
            "Tracing initialized with file output"
        );
        Ok(Some(path))
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::Layer::default()
                    .with_writer(io::stderr)
                    .with_ansi(false)
                    .with_target(true),
            )
            .with(env_filter());

        tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

        tracing::debug!(
            target: "streamwatch::utils::tracing",
            "Tracing initialized with stderr output"
        );
        Ok(None)
    }
}
