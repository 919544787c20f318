use crate::config::FileSinkConfig;
use crate::{record::LogRecord, sink::LogSink, sink::Delivery, sink::SinkError};
use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Appends each record as one JSON line to a local file.
///
/// The parent directory is created on demand and the file is reopened in
/// append mode for every record, so external rotation (move + recreate)
/// is picked up without a restart.
#[derive(Clone, Debug)]
pub struct FileSink {
    config: FileSinkConfig,
}

impl FileSink {
    pub fn new(config: FileSinkConfig) -> Self {
        FileSink { config }
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    fn delivery(&self) -> Delivery {
        Delivery::Write
    }

    fn describe(&self) -> String {
        self.config.path.display().to_string()
    }
}
