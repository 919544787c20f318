use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::ReadinessConfig;

/// Outcome of [`wait_for_ready`]. Either way the caller carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The host answered 200 on attempt `attempts`.
    Ready { attempts: u32 },
    /// No check succeeded within `attempts` tries.
    GaveUp { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

/// Poll `host` with `GET` until it answers 200.
///
/// Each failed check (transport error or any other status) logs the
/// attempt number and waits `config.interval` before the next one. There
/// is no pause after the final attempt. This never returns an error: when
/// the attempts run out the caller proceeds anyway and the first sends may
/// fail against a backend that is still starting.
pub async fn wait_for_ready(client: &Client, host: &str, config: &ReadinessConfig) -> Readiness {
    let max = config.max_attempts;

    for attempt in 1..=max {
        let reason = match client
            .get(host)
            .timeout(config.request_timeout)
            .send()
            .await
        {
            Ok(resp) if resp.status() == StatusCode::OK => {
                info!(host, attempt, "✓ Elasticsearch is ready!");
                return Readiness::Ready { attempts: attempt };
            }
            Ok(resp) => format!("status {}", resp.status()),
            Err(e) => e.to_string(),
        };

        info!(host, "Waiting for Elasticsearch... ({attempt}/{max}): {reason}");
        if attempt < max {
            sleep(config.interval).await;
        }
    }

    warn!(host, attempts = max, "Elasticsearch did not become ready, continuing anyway");
    Readiness::GaveUp { attempts: max }
}
