use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use log_traffic_gen::{
    config::{DelayRange, GeneratorConfig},
    init::init_tracing,
    record::LogRecord,
    reporter::TracingReporter,
    runner::Runner,
    sink::{LogSink, SinkError},
};

/// Example of plugging in a completely custom destination by
/// implementing the `LogSink` trait directly. Imagine this talks to some
/// proprietary collector for which this crate does not provide a
/// built-in sink. For the sake of example we just print the record.
struct MyCollectorSink;

#[async_trait]
impl LogSink for MyCollectorSink {
    async fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        println!("[my-collector] {} {} {}", record.request_id, record.status_code, record.message);
        Ok(())
    }

    fn describe(&self) -> String {
        "my-collector".to_string()
    }
}

#[tokio::main]
async fn main() {
    init_tracing().expect("install tracing subscriber");

    let sink: Arc<dyn LogSink> = Arc::new(MyCollectorSink);
    let config = GeneratorConfig {
        delay: DelayRange::new(Duration::from_millis(100), Duration::from_millis(300))
            .expect("valid delay range"),
        max_records: Some(10),
        seed: None,
    };

    let reporter = Arc::new(TracingReporter::for_sink(&*sink));
    Runner::new(sink, reporter, config)
        .run(CancellationToken::new())
        .await;
}
