//! Environment variable names read by [`AppConfig::from_env`](crate::config::AppConfig::from_env).
//!
//! These are purely helpers; sinks and the runner take explicit config
//! structs and never touch the environment themselves.

/// Sink DSN, e.g. `http://elasticsearch:9200/app-logs` or `file:///var/log/app/application.log`.
pub const LOG_GEN_TARGET_ENV: &str = "LOG_GEN_TARGET";

/// Output path used by a bare `file://` target.
pub const LOG_GEN_FILE_PATH_ENV: &str = "LOG_GEN_FILE_PATH";

/// Lower bound of the pause between records, in milliseconds.
pub const LOG_GEN_MIN_DELAY_MS_ENV: &str = "LOG_GEN_MIN_DELAY_MS";

/// Upper bound of the pause between records, in milliseconds.
pub const LOG_GEN_MAX_DELAY_MS_ENV: &str = "LOG_GEN_MAX_DELAY_MS";

/// Optional number of records after which the generator stops.
pub const LOG_GEN_MAX_RECORDS_ENV: &str = "LOG_GEN_MAX_RECORDS";

/// Timeout of a single document POST, in milliseconds.
pub const LOG_GEN_REQUEST_TIMEOUT_MS_ENV: &str = "LOG_GEN_REQUEST_TIMEOUT_MS";

/// Number of readiness checks before giving up.
pub const LOG_GEN_READY_ATTEMPTS_ENV: &str = "LOG_GEN_READY_ATTEMPTS";

/// Pause between readiness checks, in milliseconds.
pub const LOG_GEN_READY_INTERVAL_MS_ENV: &str = "LOG_GEN_READY_INTERVAL_MS";

/// Timeout of a single readiness check, in milliseconds.
pub const LOG_GEN_READY_TIMEOUT_MS_ENV: &str = "LOG_GEN_READY_TIMEOUT_MS";

/// Optional RNG seed for reproducible traffic.
pub const LOG_GEN_SEED_ENV: &str = "LOG_GEN_SEED";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating unset and empty as absent.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
