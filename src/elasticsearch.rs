use crate::config::{ElasticsearchConfig, ReadinessConfig};
use crate::readiness::wait_for_ready;
use crate::{record::LogRecord, sink::LogSink, sink::SinkError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

/// Elasticsearch sink that indexes each record as a single document via
/// `POST {host}/{index}/_doc`.
#[derive(Clone)]
pub struct ElasticsearchSink {
    client: Client,
    config: ElasticsearchConfig,
    readiness: ReadinessConfig,
}

impl ElasticsearchSink {
    pub fn new(config: ElasticsearchConfig, readiness: ReadinessConfig) -> Self {
        ElasticsearchSink {
            client: Client::new(),
            config,
            readiness,
        }
    }

    /// Document endpoint, tolerant of a trailing slash on the host.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/_doc",
            self.config.host.trim_end_matches('/'),
            self.config.index
        )
    }

    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }
}

#[async_trait]
impl LogSink for ElasticsearchSink {
    async fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        let body = serde_json::to_vec(record)?;

        let resp = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.request_timeout)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(SinkError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn needs_readiness(&self) -> bool {
        true
    }

    async fn wait_ready(&self) {
        wait_for_ready(&self.client, &self.config.host, &self.readiness).await;
    }

    fn describe(&self) -> String {
        format!(
            "{}/{}",
            self.config.host.trim_end_matches('/'),
            self.config.index
        )
    }
}
