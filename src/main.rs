use std::process::ExitCode;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use log_traffic_gen::backend::{make_sink_from_config, parse_dsn, BackendKind, SinkOptions};
use log_traffic_gen::config::AppConfig;
use log_traffic_gen::init::{init_tracing_with_config, TracingConfig};
use log_traffic_gen::reporter::TracingReporter;
use log_traffic_gen::runner::Runner;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Records own stdout when streaming to the console.
    let to_stderr = matches!(
        parse_dsn(&config.target).map(|b| b.kind),
        Ok(BackendKind::Console)
    );
    let tracing_config = TracingConfig {
        to_stderr,
        ..TracingConfig::default()
    };
    if let Err(e) = init_tracing_with_config(tracing_config) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let backend = parse_dsn(&config.target)?;
    let sink = make_sink_from_config(&backend, &SinkOptions::from(&config))?;

    info!("Starting log generator...");
    info!("{}: {}", sink.delivery().banner(), sink.describe());
    info!("{}", "-".repeat(80));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            on_signal.cancel();
        }
    });

    let reporter = Arc::new(TracingReporter::for_sink(&*sink));
    let mut runner = Runner::new(sink, reporter, config.generator);
    runner.run(cancel).await;
    Ok(())
}
