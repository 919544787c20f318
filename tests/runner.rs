mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CollectingSink, Outcome, RecordingReporter};
use log_traffic_gen::config::{DelayRange, FileSinkConfig, GeneratorConfig};
use log_traffic_gen::file::FileSink;
use log_traffic_gen::generator::{MESSAGES, STATUS_CODES};
use log_traffic_gen::record::LogRecord;
use log_traffic_gen::reporter::NoopReporter;
use log_traffic_gen::runner::{RunSummary, Runner};
use tempfile::TempDir;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

fn bounded(max_records: u64) -> GeneratorConfig {
    GeneratorConfig {
        delay: DelayRange::new(Duration::ZERO, Duration::ZERO).unwrap(),
        max_records: Some(max_records),
        seed: Some(17),
    }
}

fn assert_valid(record: &LogRecord) {
    assert!(MESSAGES.contains(&record.message.as_str()));
    assert!(STATUS_CODES.contains(&record.status_code));
    assert!((10..=5000).contains(&record.duration_ms));
    assert!(record.user_id.starts_with("user_") && record.user_id.len() == 9);
    assert!(record.request_id.starts_with("req_") && record.request_id.len() == 9);
}

#[tokio::test]
async fn bounded_run_sends_exactly_n_records() {
    let sink = Arc::new(CollectingSink::default());
    let reporter = Arc::new(RecordingReporter::default());
    let mut runner = Runner::new(sink.clone(), reporter.clone(), bounded(25));

    let summary = runner.run(CancellationToken::new()).await;

    assert_eq!(
        summary,
        RunSummary {
            records: 25,
            delivered: 25,
            failed: 0
        }
    );
    let records = sink.records();
    assert_eq!(records.len(), 25);
    records.iter().for_each(assert_valid);
    assert_eq!(reporter.outcomes().len(), 25);
    assert_eq!(*sink.flushes.lock().unwrap(), 1);
}

#[tokio::test]
async fn failing_sink_never_stops_the_loop() {
    let sink = Arc::new(CollectingSink::failing());
    let reporter = Arc::new(RecordingReporter::default());
    let mut runner = Runner::new(sink.clone(), reporter.clone(), bounded(10));

    let summary = runner.run(CancellationToken::new()).await;

    assert_eq!(summary.records, 10);
    assert_eq!(summary.failed, 10);
    assert_eq!(summary.delivered, 0);
    assert!(reporter
        .outcomes()
        .iter()
        .all(|o| matches!(o, Outcome::Failure(_, e) if e.contains("503"))));
}

#[tokio::test]
async fn readiness_runs_once_before_first_record() {
    let sink = Arc::new(CollectingSink::with_readiness());
    let mut runner = Runner::new(sink.clone(), Arc::new(NoopReporter), bounded(3));

    runner.run(CancellationToken::new()).await;

    assert_eq!(*sink.ready_calls.lock().unwrap(), 1);
    assert_eq!(sink.records().len(), 3);
}

#[tokio::test]
async fn cancelled_token_produces_nothing() {
    let sink = Arc::new(CollectingSink::default());
    let mut runner = Runner::new(sink.clone(), Arc::new(NoopReporter), bounded(100));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let summary = runner.run(cancel).await;

    assert_eq!(summary, RunSummary::default());
    assert!(sink.records().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancellation_stops_an_unbounded_run() {
    let sink = Arc::new(CollectingSink::default());
    let config = GeneratorConfig {
        delay: DelayRange::new(Duration::from_millis(1), Duration::from_millis(3)).unwrap(),
        max_records: None,
        seed: None,
    };
    let mut runner = Runner::new(sink.clone(), Arc::new(NoopReporter), config);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { runner.run(cancel).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let summary = timeout(Duration::from_secs(5), handle)
        .await
        .expect("runner did not stop")
        .unwrap();
    assert!(summary.records > 0);
    assert_eq!(summary.records as usize, sink.records().len());
}

#[tokio::test]
async fn file_sink_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("var/log/app/application.log");
    let sink = Arc::new(FileSink::new(FileSinkConfig { path: path.clone() }));
    let mut runner = Runner::new(sink, Arc::new(NoopReporter), bounded(10));

    let summary = runner.run(CancellationToken::new()).await;
    assert_eq!(summary.delivered, 10);

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<LogRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 10);
    records.iter().for_each(assert_valid);
}

#[tokio::test]
async fn separator_follows_readiness_phase() {
    let separator = "-".repeat(80);

    let (logs, _guard) = common::capture_logs();
    let sink = Arc::new(CollectingSink::with_readiness());
    Runner::new(sink, Arc::new(NoopReporter), bounded(1))
        .run(CancellationToken::new())
        .await;
    assert!(logs.text().contains(&separator), "{}", logs.text());
}

#[tokio::test]
async fn no_separator_without_readiness() {
    let separator = "-".repeat(80);

    let (logs, _guard) = common::capture_logs();
    let sink = Arc::new(CollectingSink::default());
    Runner::new(sink, Arc::new(NoopReporter), bounded(1))
        .run(CancellationToken::new())
        .await;
    let text = logs.text();
    assert!(text.contains("generator running"), "{text}");
    assert!(!text.contains(&separator), "{text}");
}
