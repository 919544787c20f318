use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::env::env_or;

/// Filter used when `RUST_LOG` is unset or cannot be parsed.
pub const DEFAULT_FILTER: &str = "info";

/// Configuration of the console logging installed by [`init_tracing_with_config`].
///
/// **Fields**
/// - `filter`: `EnvFilter` directive, e.g. `info` or `log_traffic_gen=debug`.
/// - `with_target`: print the event target next to each line.
/// - `ansi`: colorize output.
/// - `to_stderr`: write log lines to stderr, leaving stdout to a sink that
///   streams records there.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub filter: String,
    pub with_target: bool,
    pub ansi: bool,
    pub to_stderr: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: env_or("RUST_LOG", DEFAULT_FILTER),
            with_target: false,
            ansi: true,
            to_stderr: false,
        }
    }
}

/// Initialize the global `tracing` subscriber.
///
/// **Effects**
///
/// Installs a [`Registry`] combined with an [`EnvFilter`] and a `fmt`
/// layer writing to stdout, or stderr when `to_stderr` is set. An invalid
/// filter directive falls back to [`DEFAULT_FILTER`].
///
/// **Returns**
/// - `Err(InitError::AlreadySet)` if a global subscriber is already
///   installed.
pub fn init_tracing_with_config(config: TracingConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_new(&config.filter)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| InitError::Filter(e.to_string()))?;

    let writer = if config.to_stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(config.with_target)
                .with_ansi(config.ansi),
        )
        .try_init()
        .map_err(|_| InitError::AlreadySet)
}

/// Initialize tracing with sensible defaults, honouring `RUST_LOG`.
pub fn init_tracing() -> Result<(), InitError> {
    init_tracing_with_config(TracingConfig::default())
}

#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("a global tracing subscriber is already installed")]
    AlreadySet,
}
