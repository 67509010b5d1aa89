//! Task collection and report rendering.

use crate::error::{Error, Result};
use crate::report::ReportRenderer;
use crate::types::{LinkCheckTask, TaskId};

use super::LinkChecker;

impl LinkChecker {
    /// Load every task that resolves, in the order requested
    ///
    /// Ids that cannot be loaded are logged and skipped.
    pub async fn collect_tasks(&self, ids: &[TaskId]) -> Vec<LinkCheckTask> {
        let mut tasks = Vec::with_capacity(ids.len());

        for &id in ids {
            match self.db.get_task(id).await {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    tracing::warn!(task_id = id.0, error = %e, "Skipping task in report");
                }
            }
        }

        tasks
    }

    /// Render a report over the given tasks
    ///
    /// Fails with [`Error::NotFound`] when none of the ids resolve.
    pub async fn generate_report(
        &self,
        ids: &[TaskId],
        renderer: &dyn ReportRenderer,
    ) -> Result<Vec<u8>> {
        let tasks = self.collect_tasks(ids).await;
        if tasks.is_empty() {
            return Err(Error::NotFound(format!(
                "none of the {} requested tasks exist",
                ids.len()
            )));
        }

        let report = renderer.render(&tasks)?;
        tracing::debug!(
            requested = ids.len(),
            included = tasks.len(),
            bytes = report.len(),
            "Report generated"
        );
        Ok(report)
    }
}
