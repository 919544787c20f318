use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use log_traffic_gen::{
    backend::{make_sink_from_config, parse_dsn, SinkOptions},
    config::GeneratorConfig,
    init::init_tracing,
    reporter::TracingReporter,
    runner::Runner,
    sink::LogSink,
};

#[tokio::main]
async fn main() {
    init_tracing().expect("install tracing subscriber");

    // Example DSN: file:///tmp/app/application.log
    let dsn = std::env::var("LOG_GEN_TARGET")
        .unwrap_or_else(|_| "file:///tmp/app/application.log".to_string());

    let backend_cfg = parse_dsn(&dsn).expect("invalid LOG_GEN_TARGET");
    let sink: Arc<dyn LogSink> = make_sink_from_config(&backend_cfg, &SinkOptions::default())
        .expect("failed to build file sink");

    let config = GeneratorConfig {
        max_records: Some(5),
        ..GeneratorConfig::default()
    };
    let reporter = Arc::new(TracingReporter::for_sink(&*sink));
    Runner::new(sink, reporter, config)
        .run(CancellationToken::new())
        .await;
}
