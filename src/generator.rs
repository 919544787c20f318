use chrono::{SubsecRound, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::DelayRange;
use crate::record::{Level, LogRecord, Service};

/// Message templates a record can carry.
pub const MESSAGES: [&str; 10] = [
    "User login successful",
    "Payment processed",
    "Database connection established",
    "API request received",
    "Cache miss occurred",
    "Failed to connect to external service",
    "Request timeout",
    "Invalid user credentials",
    "Session expired",
    "Data validation failed",
];

/// HTTP status codes a record can report.
pub const STATUS_CODES: [u16; 7] = [200, 201, 400, 401, 404, 500, 503];

pub const USER_ID_RANGE: std::ops::RangeInclusive<u32> = 1000..=9999;
pub const REQUEST_ID_RANGE: std::ops::RangeInclusive<u32> = 10000..=99999;
pub const DURATION_MS_RANGE: std::ops::RangeInclusive<u32> = 10..=5000;

/// Produces [`LogRecord`]s by sampling each field independently and
/// uniformly. No correlation between level, message and status is kept.
pub struct LogGenerator<R = SmallRng> {
    rng: R,
}

impl LogGenerator<SmallRng> {
    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Deterministic generator, handy for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LogGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> LogRecord {
        LogRecord {
            timestamp: Utc::now().trunc_subsecs(6),
            level: pick(&mut self.rng, &Level::ALL),
            service: pick(&mut self.rng, &Service::ALL),
            message: pick(&mut self.rng, &MESSAGES).to_string(),
            user_id: format!("user_{}", self.rng.random_range(USER_ID_RANGE)),
            request_id: format!("req_{}", self.rng.random_range(REQUEST_ID_RANGE)),
            duration_ms: self.rng.random_range(DURATION_MS_RANGE),
            status_code: pick(&mut self.rng, &STATUS_CODES),
        }
    }

    /// Sample the pause before the next record from `range`.
    pub fn next_delay(&mut self, range: &DelayRange) -> Duration {
        if range.min >= range.max {
            return range.min;
        }
        let secs = self
            .rng
            .random_range(range.min.as_secs_f64()..=range.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

fn pick<R: Rng, T: Copy, const N: usize>(rng: &mut R, items: &[T; N]) -> T {
    items[rng.random_range(0..N)]
}
