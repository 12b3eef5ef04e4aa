//! Logging setup on top of `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: fatal failures
//! - `warn`: coercion warnings, duplicate headers, rollback problems
//! - `info`: stage progress and per-batch confirmations
//! - `debug`: run state transitions, connection lifecycle
//! - `trace`: row-level values (only with `--log-data`)
//!
//! # Usage
//!
//! ```ignore
//! use catalog_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
//! init_logging(&config)?;
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged instead of row values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

const CATALOG_CRATES: [&str; 6] = [
    "catalog_cli",
    "catalog_ingest",
    "catalog_map",
    "catalog_model",
    "catalog_sql",
    "catalog_transform",
];

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns `value` when row logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the importer's own crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the computed filter when it is set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Include the module path of each event.
    pub with_target: bool,
    /// Emit span close events in JSON output.
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Whether product values may appear in trace output.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-colored.
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Installs the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(format_layer(config, writer))
        .with(build_env_filter(config))
        .init();
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn format_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => {
            let span_events = if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            };
            layer.json().with_span_events(span_events).boxed()
        }
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Default directives: our crates at the configured level, everything else
/// (sqlx logs every statement) capped at warn.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let external = if level_filter < LevelFilter::WARN {
        level.clone()
    } else {
        "warn".to_string()
    };
    let mut directives = vec![external];
    directives.extend(CATALOG_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
