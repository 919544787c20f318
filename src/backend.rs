use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, ReadinessConfig, DEFAULT_INDEX_NAME};
use crate::sink::LogSink;

/// Supported sink kinds that can be selected via DSN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Elasticsearch,
    File,
    Console,
    Noop,
}

/// Sink selection built from a DSN.
///
/// It only stores the target kind and the raw DSN string; the pieces a
/// concrete sink needs are extracted when the sink is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Selected sink implementation.
    pub kind: BackendKind,
    /// Raw DSN that was used to construct this config.
    pub dsn: String,
}

impl BackendConfig {
    pub fn new(kind: BackendKind, dsn: impl Into<String>) -> Self {
        BackendConfig { kind, dsn: dsn.into() }
    }
}

/// Settings shared by every sink built through [`make_sink_from_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    pub request_timeout: Duration,
    pub readiness: ReadinessConfig,
    /// Path used by a bare `file://` DSN.
    pub default_file_path: PathBuf,
}

impl From<&AppConfig> for SinkOptions {
    fn from(config: &AppConfig) -> Self {
        SinkOptions {
            request_timeout: config.request_timeout,
            readiness: config.readiness.clone(),
            default_file_path: config.default_file_path.clone(),
        }
    }
}

impl Default for SinkOptions {
    fn default() -> Self {
        SinkOptions::from(&AppConfig::default())
    }
}

/// Parse a DSN string and infer the sink kind from its scheme.
///
/// Examples:
/// - "http://elasticsearch:9200/app-logs"
/// - "elasticsearch://localhost:9200/app-logs"
/// - "file:///var/log/app/application.log"
/// - "stdout://" or "-"
/// - "noop://"
pub fn parse_dsn(dsn: &str) -> Result<BackendConfig, DsnError> {
    let dsn = dsn.trim();
    let lower = dsn.to_ascii_lowercase();

    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("elasticsearch://")
    {
        Ok(BackendConfig::new(BackendKind::Elasticsearch, dsn))
    } else if lower.starts_with("file://") {
        Ok(BackendConfig::new(BackendKind::File, dsn))
    } else if lower == "-" || lower.starts_with("stdout://") {
        Ok(BackendConfig::new(BackendKind::Console, dsn))
    } else if lower.starts_with("noop://") {
        Ok(BackendConfig::new(BackendKind::Noop, dsn))
    } else {
        Err(DsnError::UnknownScheme(dsn.to_string()))
    }
}

/// Split an Elasticsearch DSN into `(base_url, index)`.
///
/// `elasticsearch://` is treated as plain `http://`. A missing index falls
/// back to [`DEFAULT_INDEX_NAME`].
pub fn elasticsearch_target(dsn: &str) -> (String, String) {
    let (scheme, rest) = match dsn.split_once("://") {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("https") => ("https", rest),
        Some((_, rest)) => ("http", rest),
        None => ("http", dsn),
    };

    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    let index = path.trim_matches('/');
    let index = if index.is_empty() { DEFAULT_INDEX_NAME } else { index };

    (format!("{}://{}", scheme, authority), index.to_string())
}

/// Extract the output path of a `file://` DSN, if any.
pub fn file_target(dsn: &str) -> Option<PathBuf> {
    let path = dsn.get("file://".len()..).unwrap_or("");
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Error type returned when parsing a DSN.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DsnError {
    #[error("unknown or unsupported DSN scheme: {0}")]
    UnknownScheme(String),
}

/// Error type returned when building a sink from configuration.
#[derive(thiserror::Error, Debug)]
pub enum BackendBuildError {
    #[error("elasticsearch feature is not enabled")]
    ElasticsearchFeatureDisabled,
}

/// Create a concrete `LogSink` implementation from a `BackendConfig`.
///
/// This is the main entry point for the binary, which selects a sink
/// with a single DSN string instead of constructing one manually.
pub fn make_sink_from_config(
    cfg: &BackendConfig,
    options: &SinkOptions,
) -> Result<Arc<dyn LogSink>, BackendBuildError> {
    match cfg.kind {
        BackendKind::Elasticsearch => {
            #[cfg(feature = "elasticsearch")]
            {
                use crate::config::ElasticsearchConfig;
                use crate::elasticsearch::ElasticsearchSink;

                let (host, index) = elasticsearch_target(&cfg.dsn);
                let config = ElasticsearchConfig {
                    host,
                    index,
                    request_timeout: options.request_timeout,
                };

                let sink = ElasticsearchSink::new(config, options.readiness.clone());
                Ok(Arc::new(sink) as Arc<dyn LogSink>)
            }

            #[cfg(not(feature = "elasticsearch"))]
            {
                let _ = (cfg, options); // silence unused warning when feature is disabled
                Err(BackendBuildError::ElasticsearchFeatureDisabled)
            }
        }
        BackendKind::File => {
            use crate::config::FileSinkConfig;
            use crate::file::FileSink;

            let path = file_target(&cfg.dsn).unwrap_or_else(|| options.default_file_path.clone());
            Ok(Arc::new(FileSink::new(FileSinkConfig { path })) as Arc<dyn LogSink>)
        }
        BackendKind::Console => Ok(Arc::new(crate::console::ConsoleSink) as Arc<dyn LogSink>),
        BackendKind::Noop => Ok(Arc::new(crate::noop_sink::NoopSink) as Arc<dyn LogSink>),
    }
}
