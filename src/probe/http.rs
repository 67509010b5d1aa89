//! reqwest-backed prober.

use crate::config::CheckerConfig;
use crate::types::LinkStatus;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use super::{Prober, normalize_url};

/// Probes URLs with a single GET and no redirect following
///
/// The underlying client is built once and reused for every probe, so
/// connection pools are shared across a whole batch.
#[derive(Clone, Debug)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober from the checker settings (timeout, user agent)
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.probe_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str, cancel: &CancellationToken) -> LinkStatus {
        let Some(target) = normalize_url(url) else {
            return LinkStatus::NotAvailable;
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(url = %url, "Probe cancelled");
                LinkStatus::NotAvailable
            }
            result = self.client.get(&target).send() => match result {
                Ok(response) => {
                    let status = classify(response.status());
                    tracing::debug!(
                        url = %url,
                        code = response.status().as_u16(),
                        status = %status,
                        "Probe finished"
                    );
                    status
                }
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Probe failed");
                    LinkStatus::NotAvailable
                }
            }
        }
    }
}

/// Map a response code onto a link status (2xx and 3xx count as reachable)
fn classify(code: StatusCode) -> LinkStatus {
    if (200..=399).contains(&code.as_u16()) {
        LinkStatus::Available
    } else {
        LinkStatus::NotAvailable
    }
}
