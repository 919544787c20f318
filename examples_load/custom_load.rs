use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use log_traffic_gen::config::{DelayRange, FileSinkConfig, GeneratorConfig};
use log_traffic_gen::file::FileSink;
use log_traffic_gen::reporter::NoopReporter;
use log_traffic_gen::runner::Runner;

#[tokio::main]
async fn main() {
    let path = std::env::temp_dir().join("log-traffic-gen").join("load.log");
    let sink = Arc::new(FileSink::new(FileSinkConfig { path: path.clone() }));

    let n: u64 = 20_000;
    let config = GeneratorConfig {
        delay: DelayRange::new(Duration::ZERO, Duration::ZERO).expect("zero delay is valid"),
        max_records: Some(n),
        seed: Some(42),
    };
    let mut runner = Runner::new(sink, Arc::new(NoopReporter), config);

    let start = Instant::now();
    let summary = runner.run(CancellationToken::new()).await;
    let elapsed = start.elapsed();

    println!("file sink: appended {} of {} records to {} in {:?} (~{:.0} rec/s)",
        summary.delivered,
        summary.records,
        path.display(),
        elapsed,
        summary.delivered as f64 / elapsed.as_secs_f64()
    );
}
