use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use crate::config::AppConfig;

const LOG_FILE_PREFIX: &str = "habit-tracker";
const MAX_LOG_FILES: usize = 5;

/// Installs the global subscriber. Logs go to stdout unless a log directory
/// is configured; then they go to daily rolling files there, mirrored to
/// stdout when asked to. A directory that cannot be opened downgrades to
/// stdout with a warning instead of failing startup.
pub fn enable_logging(config: &AppConfig) -> Result<()> {
    let (writer, file_error) = log_writer(config);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_filter)?)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    if let Some(err) = file_error {
        warn!("file logging disabled, writing to stdout only: {err:#}");
    }
    Ok(())
}

fn log_writer(config: &AppConfig) -> (BoxMakeWriter, Option<anyhow::Error>) {
    let (appender, file_error) = match &config.log_dir {
        Some(dir) => match open_appender(dir) {
            Ok(appender) => (Some(appender), None),
            Err(err) => (None, Some(err)),
        },
        None => (None, None),
    };

    let show_std = config.log_to_stdout || appender.is_none();
    let stdout = std::io::stdout.with_filter(move |_| show_std);
    let writer = match appender {
        Some(appender) => BoxMakeWriter::new(stdout.and(appender)),
        None => BoxMakeWriter::new(stdout),
    };
    (writer, file_error)
}

fn open_appender(dir: &Path) -> Result<RollingFileAppender> {
    tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
        .with_context(|| format!("failed to open log directory {}", dir.display()))
}

fn env_filter(filter: &str) -> Result<EnvFilter> {
    let directive = scoped_directive(filter);
    EnvFilter::try_new(&directive).with_context(|| format!("invalid log filter `{directive}`"))
}

/// Bare levels are scoped to this crate so toolkit crates stay quiet.
fn scoped_directive(filter: &str) -> String {
    if filter.contains('=') {
        filter.to_string()
    } else {
        format!("{}={filter}", env!("CARGO_PKG_NAME").replace('-', "_"))
    }
}

#[cfg(test)]
pub(crate) static TEST_LOGGING: std::sync::LazyLock<()> = std::sync::LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::level_filters::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
});

#[cfg(test)]
pub(crate) fn init_test_logging() {
    std::sync::LazyLock::force(&TEST_LOGGING);
}
