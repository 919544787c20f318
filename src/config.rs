use std::path::PathBuf;
use std::time::Duration;

use crate::env::{self, env_opt};

/// Default Elasticsearch base URL.
pub const DEFAULT_ES_HOST: &str = "http://elasticsearch:9200";
/// Default Elasticsearch index receiving the documents.
pub const DEFAULT_INDEX_NAME: &str = "app-logs";
/// Default JSON Lines output path for the file sink.
pub const DEFAULT_LOG_FILE_PATH: &str = "/var/log/app/application.log";

/// Inclusive bounds of the pause between two records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidDelayRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(1),
            max: Duration::from_secs(5),
        }
    }
}

/// Settings for [`ElasticsearchSink`](crate::elasticsearch::ElasticsearchSink).
///
/// **Fields**
/// - `host`: base URL of the cluster, e.g. `http://localhost:9200`.
/// - `index`: target index; documents go to `{host}/{index}/_doc`.
/// - `request_timeout`: upper bound for a single POST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElasticsearchConfig {
    pub host: String,
    pub index: String,
    pub request_timeout: Duration,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_ES_HOST.to_string(),
            index: DEFAULT_INDEX_NAME.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Polling policy used before the first record is sent over HTTP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    pub interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSinkConfig {
    pub path: PathBuf,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
        }
    }
}

/// Knobs of the generate/deliver/sleep loop.
///
/// `max_records = None` keeps the loop running until cancelled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub delay: DelayRange,
    pub max_records: Option<u64>,
    pub seed: Option<u64>,
}

/// Everything the binary needs, resolved once at start-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Sink DSN, see [`parse_dsn`](crate::backend::parse_dsn).
    pub target: String,
    pub default_file_path: PathBuf,
    pub request_timeout: Duration,
    pub readiness: ReadinessConfig,
    pub generator: GeneratorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target: format!("{}/{}", DEFAULT_ES_HOST, DEFAULT_INDEX_NAME),
            default_file_path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
            request_timeout: ElasticsearchConfig::default().request_timeout,
            readiness: ReadinessConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the process environment on top of [`AppConfig::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_opt)
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &str, fallback: Duration| -> Result<Duration, ConfigError> {
            Ok(parse_number::<u64>(key, lookup(key))?
                .map(Duration::from_millis)
                .unwrap_or(fallback))
        };

        let delay = DelayRange::new(
            millis(env::LOG_GEN_MIN_DELAY_MS_ENV, defaults.generator.delay.min)?,
            millis(env::LOG_GEN_MAX_DELAY_MS_ENV, defaults.generator.delay.max)?,
        )?;

        Ok(Self {
            target: lookup(env::LOG_GEN_TARGET_ENV).unwrap_or(defaults.target),
            default_file_path: lookup(env::LOG_GEN_FILE_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.default_file_path),
            request_timeout: millis(env::LOG_GEN_REQUEST_TIMEOUT_MS_ENV, defaults.request_timeout)?,
            readiness: ReadinessConfig {
                max_attempts: parse_number(
                    env::LOG_GEN_READY_ATTEMPTS_ENV,
                    lookup(env::LOG_GEN_READY_ATTEMPTS_ENV),
                )?
                .unwrap_or(defaults.readiness.max_attempts),
                interval: millis(env::LOG_GEN_READY_INTERVAL_MS_ENV, defaults.readiness.interval)?,
                request_timeout: millis(
                    env::LOG_GEN_READY_TIMEOUT_MS_ENV,
                    defaults.readiness.request_timeout,
                )?,
            },
            generator: GeneratorConfig {
                delay,
                max_records: parse_number(
                    env::LOG_GEN_MAX_RECORDS_ENV,
                    lookup(env::LOG_GEN_MAX_RECORDS_ENV),
                )?,
                seed: parse_number(env::LOG_GEN_SEED_ENV, lookup(env::LOG_GEN_SEED_ENV))?,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                key: key.to_string(),
                value,
            }),
    }
}

/// Error type returned when the environment cannot be turned into an
/// [`AppConfig`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: String, value: String },

    #[error("minimum delay {min:?} exceeds maximum delay {max:?}")]
    InvalidDelayRange { min: Duration, max: Duration },
}
