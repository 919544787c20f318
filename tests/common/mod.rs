#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log_traffic_gen::record::LogRecord;
use log_traffic_gen::reporter::Reporter;
use log_traffic_gen::sink::{LogSink, SinkError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request captured by [`MockServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP/1.1 server answering with a scripted list of statuses.
///
/// The n-th request gets `statuses[n]`; once the script runs out the last
/// status repeats. Every response closes the connection.
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub async fn start(statuses: Vec<u16>) -> Self {
        assert!(!statuses.is_empty());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("failed to get addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    return;
                };
                let index = seen.lock().unwrap().len();
                let status = statuses[index.min(statuses.len() - 1)];
                serve_one(socket, status, &seen).await;
            }
        });

        MockServer { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn serve_one(
    mut socket: TcpStream,
    status: u16,
    seen: &Mutex<Vec<RecordedRequest>>,
) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    // Record before answering so the client never observes a response
    // that is not yet counted.
    seen.lock().unwrap().push(RecordedRequest {
        method,
        path,
        headers,
        body,
    });

    let payload = if (200..300).contains(&status) {
        r#"{"result":"created"}"#.to_string()
    } else {
        format!(r#"{{"error":"mock failure","status":{}}}"#, status)
    };
    let response = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    Some(())
}

/// Address nothing listens on, for transport failures.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("failed to get addr");
    drop(listener);
    format!("http://{}", addr)
}

/// Outcome captured by [`RecordingReporter`].
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(LogRecord),
    Failure(LogRecord, String),
}

#[derive(Default)]
pub struct RecordingReporter {
    outcomes: Mutex<Vec<Outcome>>,
}

impl RecordingReporter {
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn on_success(&self, record: &LogRecord) {
        self.outcomes
            .lock()
            .unwrap()
            .push(Outcome::Success(record.clone()));
    }

    fn on_failure(&self, record: &LogRecord, error: &SinkError) {
        self.outcomes
            .lock()
            .unwrap()
            .push(Outcome::Failure(record.clone(), error.to_string()));
    }
}

/// In-memory sink that keeps every record and can be told to fail.
#[derive(Default)]
pub struct CollectingSink {
    pub records: Mutex<Vec<LogRecord>>,
    pub fail: bool,
    pub readiness: bool,
    pub ready_calls: Mutex<u32>,
    pub flushes: Mutex<u32>,
}

impl CollectingSink {
    pub fn failing() -> Self {
        CollectingSink {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_readiness() -> Self {
        CollectingSink {
            readiness: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for CollectingSink {
    async fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        if self.fail {
            return Err(SinkError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }

    fn needs_readiness(&self) -> bool {
        self.readiness
    }

    async fn wait_ready(&self) {
        assert!(
            self.records.lock().unwrap().is_empty(),
            "readiness must complete before the first send"
        );
        *self.ready_calls.lock().unwrap() += 1;
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// In-memory `tracing` output, usable as a `MakeWriter`.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Install a thread-local fmt subscriber writing into the returned buffer.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
