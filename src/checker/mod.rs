//! Link check executor.
//!
//! The `LinkChecker` struct and its methods are organized by domain:
//! - [`execution`] - Task creation and bounded probe fan-out
//! - [`report`] - Task collection and report rendering

mod execution;
mod report;


use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::probe::{HttpProber, Prober};
use crate::types::{LinkCheckTask, TaskId};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Main checker instance (cloneable - all fields are Arc-wrapped)
///
/// Every clone shares the same probe gate, so the configured limit holds
/// across all batches running through one instance.
#[derive(Clone)]
pub struct LinkChecker {
    /// Task store (wrapped in Arc for sharing across probes)
    /// Public for integration tests to inspect stored statuses
    pub db: Arc<Database>,
    /// Probe implementation (trait object so tests can substitute a fake)
    pub(crate) prober: Arc<dyn Prober>,
    /// Semaphore admitting at most `max_concurrent_probes` probes at once
    pub(crate) probe_limit: Arc<Semaphore>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
}

impl LinkChecker {
    /// Create a checker that probes over HTTP
    pub fn new(config: Config, db: Arc<Database>) -> Result<Self> {
        let prober = Arc::new(HttpProber::new(&config.checker)?);
        Self::with_prober(config, db, prober)
    }

    /// Create a checker with a custom [`Prober`]
    pub fn with_prober(config: Config, db: Arc<Database>, prober: Arc<dyn Prober>) -> Result<Self> {
        config.validate()?;

        let probe_limit = Arc::new(Semaphore::new(config.checker.max_concurrent_probes));

        tracing::info!(
            max_concurrent_probes = config.checker.max_concurrent_probes,
            probe_timeout_secs = config.checker.probe_timeout.as_secs(),
            "Link checker initialized"
        );

        Ok(Self {
            db,
            prober,
            probe_limit,
            config: Arc::new(config),
        })
    }

    /// Get the current status of every link in a task
    ///
    /// Fails with [`TaskError::NotFound`](crate::error::TaskError::NotFound)
    /// when the id is unknown.
    pub async fn get_task_results(&self, id: TaskId) -> Result<LinkCheckTask> {
        self.db.get_task(id).await
    }

    /// Configuration this checker was built with
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }
}
