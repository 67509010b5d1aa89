//! Reachability probing for individual URLs.
//!
//! A [`Prober`] turns one URL into a terminal [`LinkStatus`]. Probe
//! failures of any kind are a status, never an error, so callers can fan
//! out freely without per-URL error handling.

use crate::types::LinkStatus;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

mod http;

pub use http::HttpProber;

/// Checks whether a single URL is reachable.
///
/// Implementations must return promptly with [`LinkStatus::NotAvailable`]
/// once `cancel` fires, and must only ever return a terminal status.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `url` once and report the outcome
    async fn probe(&self, url: &str, cancel: &CancellationToken) -> LinkStatus;
}

/// Prefix `http://` when the URL carries no HTTP scheme
///
/// Returns `None` for an empty URL. No other validation happens here;
/// malformed input surfaces as a failed probe.
pub fn normalize_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(url.to_string())
    } else {
        Some(format!("http://{}", url))
    }
}
