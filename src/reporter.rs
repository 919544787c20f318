use crate::record::LogRecord;
use crate::sink::{Delivery, LogSink, SinkError};
use tracing::{info, warn};

/// Observer notified about the outcome of every delivery attempt.
///
/// The runner never propagates sink errors; this is the only place they
/// surface. Swap in [`NoopReporter`] for silent runs.
pub trait Reporter: Send + Sync {
    fn on_success(&self, record: &LogRecord);

    fn on_failure(&self, record: &LogRecord, error: &SinkError);
}

/// Reports through `tracing`: `info` for delivered records, `warn` for
/// failures. Wording follows the sink's [`Delivery`] kind.
#[derive(Clone, Debug, Default)]
pub struct TracingReporter {
    delivery: Delivery,
}

impl TracingReporter {
    pub fn new(delivery: Delivery) -> Self {
        Self { delivery }
    }

    pub fn for_sink(sink: &dyn LogSink) -> Self {
        Self::new(sink.delivery())
    }
}

impl Reporter for TracingReporter {
    fn on_success(&self, record: &LogRecord) {
        let verb = match self.delivery {
            Delivery::Send => "sent",
            Delivery::Write => "written",
        };
        info!(
            request_id = %record.request_id,
            "✓ Log {}: {} - {} - {}",
            verb,
            record.level,
            record.service,
            record.message
        );
    }

    fn on_failure(&self, record: &LogRecord, error: &SinkError) {
        let what = match self.delivery {
            Delivery::Send => "Failed to send log",
            Delivery::Write => "Error writing log",
        };
        warn!(request_id = %record.request_id, "✗ {}: {}", what, error);
    }
}

#[derive(Clone, Debug, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn on_success(&self, _record: &LogRecord) {}

    fn on_failure(&self, _record: &LogRecord, _error: &SinkError) {}
}
