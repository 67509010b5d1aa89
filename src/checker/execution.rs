//! Task creation and bounded probe fan-out.

use crate::error::Result;
use crate::types::{LinkStatus, TaskId};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

use super::LinkChecker;

/// What happened to one URL of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeOutcome {
    /// Probe finished and the status was stored
    Recorded(LinkStatus),
    /// Another batch stored a terminal status first; this result was dropped
    AlreadyTerminal,
    /// Probe finished but the status could not be stored
    PersistFailed,
    /// Batch was cancelled before the status could be stored
    Cancelled,
}

impl LinkChecker {
    /// Check a list of URLs and return the task that holds their statuses
    ///
    /// Blocks until every probe has finished. Individual probe or
    /// persistence failures do not fail the call; only task creation does.
    pub async fn check_links(&self, urls: &[String]) -> Result<TaskId> {
        self.check_links_with_cancel(urls, CancellationToken::new())
            .await
    }

    /// Same as [`check_links`](Self::check_links) but stops early when
    /// `cancel` fires
    ///
    /// Probes waiting for a slot give up, in-flight probes abort, and no
    /// status obtained after cancellation is stored. The task id is still
    /// returned; unfinished links remain `pending`.
    pub async fn check_links_with_cancel(
        &self,
        urls: &[String],
        cancel: CancellationToken,
    ) -> Result<TaskId> {
        let created = self.db.create_task(urls).await.inspect_err(|e| {
            tracing::error!(links = urls.len(), error = %e, "Failed to create link check task");
        })?;
        let id = created.id;

        let targets: Vec<String> = if created.created {
            distinct(urls)
        } else {
            // Idempotent hit: only links that never reached a terminal status
            self.db
                .get_task(id)
                .await?
                .links
                .into_iter()
                .filter(|link| !link.status.is_terminal())
                .map(|link| link.url)
                .collect()
        };

        if targets.is_empty() {
            tracing::debug!(task_id = id.0, "Nothing left to probe");
            return Ok(id);
        }

        let total = targets.len();
        tracing::info!(
            task_id = id.0,
            links = total,
            reused = !created.created,
            "Checking links"
        );

        let outcomes: Vec<ProbeOutcome> = stream::iter(targets)
            .map(|url| self.probe_and_record(id, url, &cancel))
            .buffer_unordered(total)
            .collect()
            .await;

        let (available, not_available, already_terminal, persist_failed, cancelled) =
            tally_outcomes(&outcomes);

        if persist_failed > 0 {
            tracing::warn!(
                task_id = id.0,
                failed = persist_failed,
                total,
                "Link check finished with unsaved statuses"
            );
        }

        if cancelled > 0 {
            tracing::info!(
                task_id = id.0,
                cancelled,
                total,
                "Link check cancelled before all statuses were saved"
            );
        } else {
            tracing::info!(
                task_id = id.0,
                available,
                not_available,
                already_terminal,
                total,
                "Link check finished"
            );
        }

        Ok(id)
    }

    /// Probe one URL behind the gate and store its status
    async fn probe_and_record(
        &self,
        id: TaskId,
        url: String,
        cancel: &CancellationToken,
    ) -> ProbeOutcome {
        let status = if url.is_empty() {
            // Empty entries keep their slot but never reach the network
            LinkStatus::NotAvailable
        } else {
            let _permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => return ProbeOutcome::Cancelled,
                permit = self.probe_limit.acquire() => match permit {
                    Ok(permit) => permit,
                    Err(_) => {
                        tracing::warn!(task_id = id.0, url = %url, "Probe gate closed");
                        return ProbeOutcome::Cancelled;
                    }
                },
            };

            self.prober.probe(&url, cancel).await
        };

        if cancel.is_cancelled() {
            return ProbeOutcome::Cancelled;
        }

        match self.db.record_link_status(id, &url, status).await {
            Ok(true) => ProbeOutcome::Recorded(status),
            Ok(false) => {
                tracing::debug!(
                    task_id = id.0,
                    url = %url,
                    status = %status,
                    "Link already has a final status"
                );
                ProbeOutcome::AlreadyTerminal
            }
            Err(e) => {
                tracing::warn!(
                    task_id = id.0,
                    url = %url,
                    status = %status,
                    error = %e,
                    "Failed to save link status"
                );
                ProbeOutcome::PersistFailed
            }
        }
    }
}

/// URLs in submission order with repeats removed
fn distinct(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}

/// Count outcomes as (available, not_available, already_terminal, persist_failed, cancelled)
fn tally_outcomes(outcomes: &[ProbeOutcome]) -> (usize, usize, usize, usize, usize) {
    outcomes
        .iter()
        .fold((0, 0, 0, 0, 0), |(a, n, t, f, c), outcome| match outcome {
            ProbeOutcome::Recorded(LinkStatus::Available) => (a + 1, n, t, f, c),
            ProbeOutcome::Recorded(_) => (a, n + 1, t, f, c),
            ProbeOutcome::AlreadyTerminal => (a, n, t + 1, f, c),
            ProbeOutcome::PersistFailed => (a, n, t, f + 1, c),
            ProbeOutcome::Cancelled => (a, n, t, f, c + 1),
        })
}
