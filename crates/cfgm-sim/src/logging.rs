//! Diagnostics for the cfgm-sim binary.
//!
//! Events from the engine crates go to `stderr` so the JSON payloads the
//! subcommands print on `stdout` stay machine readable.

use std::env;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable consulted when `--log-format` is not given.
pub const LOG_FORMAT_ENV: &str = "CFGM_LOG_FORMAT";

/// Shape of the lines written to `stderr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("`CFGM_LOG_FORMAT` is not valid UTF-8")]
    InvalidUnicode,
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat { provided: String },
    #[error("failed to install tracing subscriber: {0}")]
    InstallFailed(#[from] tracing_subscriber::util::TryInitError),
}

/// Picks the log format: the flag wins, then `CFGM_LOG_FORMAT`, then human.
pub fn resolve_format(flag: Option<LogFormat>) -> Result<LogFormat, LoggingError> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode),
    }
}

/// Installs the global subscriber. `RUST_LOG` sets the level, `info` by default.
pub fn init_logging(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.compact().boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
