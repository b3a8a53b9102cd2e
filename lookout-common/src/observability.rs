//! Diagnostic logger shared by the binary and integration tests.
//!
//! The initializer installs the process-wide `tracing` subscriber once. The
//! file sink is a single append-only file with no rotation, one line per
//! event in the form `<timestamp> - <LEVEL> - <message>`. Keep the returned
//! [`LogHandle`] alive until exit; dropping it flushes the background writer.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use serde::Deserialize;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR_ENV: &str = "LOOKOUT_LOG_DIR";

/// Output encoding for the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// File name of the log inside `dir`.
    pub file_name: String,
    /// Explicit directory for the log file. If `None`, we consult
    /// `LOOKOUT_LOG_DIR` and finally fall back to the working directory.
    pub dir: Option<PathBuf>,
    /// Whether to duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_name: "lookout.log".to_string(),
            dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Owns the background writer of the file sink.
#[must_use = "dropping the handle flushes and stops the log writer"]
pub struct LogHandle {
    path: PathBuf,
    _guard: WorkerGuard,
}

impl LogHandle {
    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Renders `<timestamp> - <LEVEL> - <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleFormat;

impl<S, N> FormatEvent<S, N> for TripleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        write!(writer, "{now} - {} - ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global `tracing` subscriber.
///
/// Fails if a global subscriber is already set: the logger is initialized
/// exactly once per process.
pub fn init_logging(config: LogConfig) -> anyhow::Result<LogHandle> {
    let dir = resolve_log_dir(config.dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;
    let full_path = dir.join(&config.file_name);

    let appender = rolling::never(&dir, &config.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    match config.format {
        LogFormat::Text => {
            let stderr = config.emit_stderr.then(|| {
                tfmt::layer()
                    .event_format(TripleFormat)
                    .with_writer(std::io::stderr)
            });
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tfmt::layer()
                        .event_format(TripleFormat)
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .with(stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
        }
        LogFormat::Json => {
            let stderr = config
                .emit_stderr
                .then(|| tfmt::layer().json().with_writer(std::io::stderr));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tfmt::layer().json().with_writer(writer))
                .with(stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
        }
    }

    Ok(LogHandle {
        path: full_path,
        _guard: guard,
    })
}

fn resolve_log_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    if let Ok(env_dir) = std::env::var(LOG_DIR_ENV) {
        return expand_home(Path::new(&env_dir));
    }

    PathBuf::from(".")
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}
