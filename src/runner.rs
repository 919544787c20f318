use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::Rng;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::generator::LogGenerator;
use crate::record::LogRecord;
use crate::reporter::Reporter;
use crate::sink::LogSink;

/// Counters collected over one [`Runner::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: u64,
    pub delivered: u64,
    pub failed: u64,
}

/// Send one record and report the outcome. Never fails.
///
/// **Returns**
/// - `true` if the sink accepted the record, `false` otherwise. The error
///   itself only reaches the [`Reporter`].
pub async fn deliver(sink: &dyn LogSink, reporter: &dyn Reporter, record: &LogRecord) -> bool {
    match sink.send(record).await {
        Ok(()) => {
            reporter.on_success(record);
            true
        }
        Err(e) => {
            reporter.on_failure(record, &e);
            false
        }
    }
}

/// Drives the generate, deliver, sleep loop against a single sink.
///
/// If the sink asks for it, the runner first waits for the backend to
/// become ready, then moves on unconditionally. The loop ends only when
/// the cancellation token fires or `max_records` records were produced.
pub struct Runner<R = SmallRng> {
    sink: Arc<dyn LogSink>,
    reporter: Arc<dyn Reporter>,
    generator: LogGenerator<R>,
    config: GeneratorConfig,
}

impl Runner<SmallRng> {
    /// Build a runner whose generator is seeded from `config.seed`, or
    /// from the OS when no seed is set.
    pub fn new(sink: Arc<dyn LogSink>, reporter: Arc<dyn Reporter>, config: GeneratorConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => LogGenerator::seeded(seed),
            None => LogGenerator::from_os_rng(),
        };
        Self::with_generator(sink, reporter, generator, config)
    }
}

impl<R: Rng + Send> Runner<R> {
    pub fn with_generator(
        sink: Arc<dyn LogSink>,
        reporter: Arc<dyn Reporter>,
        generator: LogGenerator<R>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            sink,
            reporter,
            generator,
            config,
        }
    }

    pub async fn run(&mut self, cancel: CancellationToken) -> RunSummary {
        let mut summary = RunSummary::default();

        if self.sink.needs_readiness() {
            debug!(sink = %self.sink.describe(), "waiting for sink readiness");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {}
                _ = self.sink.wait_ready() => {}
            }
            info!("{}", "-".repeat(80));
        }

        info!(sink = %self.sink.describe(), "generator running");

        loop {
            if cancel.is_cancelled() || self.limit_reached(&summary) {
                break;
            }

            let record = self.generator.generate();
            summary.records += 1;
            if deliver(&*self.sink, &*self.reporter, &record).await {
                summary.delivered += 1;
            } else {
                summary.failed += 1;
            }

            if self.limit_reached(&summary) {
                break;
            }

            let delay = self.generator.next_delay(&self.config.delay);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = sleep(delay) => {}
            }
        }

        if let Err(e) = self.sink.flush().await {
            warn!(error = %e, "sink flush failed");
        }

        info!(
            records = summary.records,
            delivered = summary.delivered,
            failed = summary.failed,
            "generator stopped"
        );
        summary
    }

    fn limit_reached(&self, summary: &RunSummary) -> bool {
        self.config
            .max_records
            .is_some_and(|max| summary.records >= max)
    }
}
