//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr. When a log file or directory is known,
//! events are also written as JSON lines through a non-blocking
//! `tracing-appender` writer; the returned guard must live until exit so the
//! writer can flush.
//!
//! Log file resolution, first match wins:
//!
//! 1. `FOGLINE_LOG_PATH`: exact file
//! 2. `FOGLINE_LOG_DIR`: `<dir>/fogline.jsonl`
//! 3. `log_dir` from config: `<dir>/fogline.jsonl`

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "FOGLINE_LOG_PATH";
const LOG_DIR_ENV: &str = "FOGLINE_LOG_DIR";
const LOG_FILE_NAME: &str = "fogline.jsonl";

/// Where, if anywhere, to write the JSONL log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log file path. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to `log_dir`.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = log_path
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| {
                env_dir
                    .filter(|d| !d.as_os_str().is_empty())
                    .or(config_dir)
                    .map(|dir| dir.join(LOG_FILE_NAME))
            });
        Self { log_file }
    }
}

/// Filter directive for the given flags. `RUST_LOG` wins when set.
fn filter_directive(quiet: bool, verbose: u8, level: &str, rust_log: Option<String>) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    level.to_string()
}

/// Build the event filter from `RUST_LOG`, the `-q`/`-v` flags, then the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, level: &str) -> EnvFilter {
    let directive = filter_directive(quiet, verbose, level, std::env::var("RUST_LOG").ok());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when file logging is on.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .boxed();

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
