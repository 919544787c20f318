use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use log_traffic_gen::config::{DelayRange, GeneratorConfig};
use log_traffic_gen::noop_sink::NoopSink;
use log_traffic_gen::reporter::NoopReporter;
use log_traffic_gen::runner::Runner;

#[tokio::main]
async fn main() {
    let n: u64 = 100_000;
    let config = GeneratorConfig {
        delay: DelayRange::new(Duration::ZERO, Duration::ZERO).expect("zero delay is valid"),
        max_records: Some(n),
        seed: None,
    };
    let mut runner = Runner::new(Arc::new(NoopSink), Arc::new(NoopReporter), config);

    let start = Instant::now();
    let summary = runner.run(CancellationToken::new()).await;
    let elapsed = start.elapsed();

    println!("default config: generated {} records in {:?} (~{:.0} rec/s)",
        summary.records,
        elapsed,
        summary.records as f64 / elapsed.as_secs_f64()
    );
}
