use crate::record::LogRecord;
use async_trait::async_trait;

/// Asynchronous destination for generated [`LogRecord`]s.
///
/// Implementations transport a record to a concrete backend
/// (Elasticsearch, a JSON Lines file, stdout, etc). The runner calls
/// `send` once per record and contains every error it returns, so a
/// failing backend never stops the generator.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver a single record to the underlying backend.
    ///
    /// **Parameters**
    /// - `record`: freshly generated [`LogRecord`].
    ///
    /// **Returns**
    /// - `Ok(())` if the backend accepted the record.
    /// - `Err(..)` on transport, HTTP status, I/O or serialization
    ///   failures. No retry is attempted by the caller.
    async fn send(&self, record: &LogRecord) -> Result<(), SinkError>;

    /// Flush any buffered output. Called once when the runner stops.
    ///
    /// Default implementation is a no-op.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Whether the runner should wait for the backend to answer before
    /// sending the first record.
    fn needs_readiness(&self) -> bool {
        false
    }

    /// Poll the backend until it is ready or the configured attempts run
    /// out. Only meaningful when [`LogSink::needs_readiness`] is `true`.
    async fn wait_ready(&self) {}

    /// Whether records travel to a remote service or get written locally.
    /// Only changes the wording of status lines.
    fn delivery(&self) -> Delivery {
        Delivery::Send
    }

    /// Human readable destination, used in the start-up banner.
    fn describe(&self) -> String;
}

/// How a sink hands records off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Shipped over the network.
    #[default]
    Send,
    /// Appended to a local stream or file.
    Write,
}

impl Delivery {
    /// Start-up banner prefix, e.g. `Sending logs to`.
    pub fn banner(&self) -> &'static str {
        match self {
            Delivery::Send => "Sending logs to",
            Delivery::Write => "Writing logs to",
        }
    }
}

/// Failure of a single [`LogSink::send`] call.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    /// Connection refused, DNS failure, timeout and similar.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a status other than 200 or 201.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(feature = "elasticsearch")]
impl From<reqwest::Error> for SinkError {
    fn from(e: reqwest::Error) -> Self {
        SinkError::Transport(Box::new(e))
    }
}
