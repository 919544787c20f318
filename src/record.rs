use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to a synthetic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
    Debug,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Warning, Level::Error, Level::Debug];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical service a record pretends to originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    AuthService,
    PaymentService,
    UserService,
    OrderService,
    NotificationService,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::AuthService,
        Service::PaymentService,
        Service::UserService,
        Service::OrderService,
        Service::NotificationService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::AuthService => "auth-service",
            Service::PaymentService => "payment-service",
            Service::UserService => "user-service",
            Service::OrderService => "order-service",
            Service::NotificationService => "notification-service",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic structured log entry, serialized as a flat JSON object.
///
/// Field order and names match the documents indexed by the pipeline, so
/// a record written by any sink can be parsed back into an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(with = "micros")]
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub service: Service,
    pub message: String,
    pub user_id: String,
    pub request_id: String,
    pub duration_ms: u32,
    pub status_code: u16,
}

/// ISO-8601 with exactly six fractional digits and a `Z` suffix.
mod micros {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
