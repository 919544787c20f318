use crate::{record::LogRecord, sink::LogSink, sink::Delivery, sink::SinkError};
use async_trait::async_trait;
use tokio::io::{self, AsyncWriteExt};

/// Writes each record as one JSON line to standard output.
///
/// Handy as a dry run: the stream can be piped into `jq` or any shipper
/// that reads JSON Lines from stdin.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl LogSink for ConsoleSink {
    async fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut stdout = io::stdout();
        stdout.write_all(&line).await?;
        stdout.flush().await?;
        Ok(())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        io::stdout().flush().await?;
        Ok(())
    }

    fn delivery(&self) -> Delivery {
        Delivery::Write
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}
