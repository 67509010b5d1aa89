//! Task creation, lookup and per-link status updates.

use crate::error::{DatabaseError, TaskError};
use crate::types::{Link, LinkCheckTask, LinkStatus, TaskId};
use crate::{Error, Result};

use super::{CreatedTask, Database, LinkStatusRow, TaskRow, canonical_url_set};

impl Database {
    /// Create a task for a URL list, or return the existing one for the same URL set
    ///
    /// The URL set is compared order-independently. On a hit nothing is
    /// written. On a miss the header and one `pending` status row per distinct
    /// URL are inserted in a single transaction, so readers never observe a
    /// header without its links.
    pub async fn create_task(&self, urls: &[String]) -> Result<CreatedTask> {
        let url_set = canonical_url_set(urls)?;

        if let Some(id) = self.find_task_by_url_set(&url_set).await? {
            return Ok(CreatedTask { id, created: false });
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to begin transaction: {}",
                e
            )))
        })?;

        // Write first so the transaction holds the write lock before it reads
        let now = chrono::Utc::now().timestamp();
        let inserted = sqlx::query(
            r#"
            INSERT INTO link_check_tasks (url_set, created_at)
            VALUES (?, ?)
            ON CONFLICT(url_set) DO NOTHING
            "#,
        )
        .bind(&url_set)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to insert link check task: {}",
                e
            )))
        })?;

        if inserted.rows_affected() == 0 {
            // A concurrent request created the same URL set first
            let id: i64 = sqlx::query_scalar("SELECT id FROM link_check_tasks WHERE url_set = ?")
                .bind(&url_set)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    Error::Database(DatabaseError::QueryFailed(format!(
                        "Failed to load existing link check task: {}",
                        e
                    )))
                })?;
            return Ok(CreatedTask {
                id: TaskId(id),
                created: false,
            });
        }

        let id = TaskId(inserted.last_insert_rowid());

        for (position, url) in urls.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO link_statuses (task_id, url, position, status)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(task_id, url) DO NOTHING
                "#,
            )
            .bind(id)
            .bind(url)
            .bind(position as i64)
            .bind(LinkStatus::Pending.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to insert link status: {}",
                    e
                )))
            })?;
        }

        tx.commit().await.map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to commit link check task: {}",
                e
            )))
        })?;

        tracing::debug!(task_id = id.0, links = urls.len(), "Created link check task");
        Ok(CreatedTask { id, created: true })
    }

    /// Look up a task id by canonical URL set
    async fn find_task_by_url_set(&self, url_set: &str) -> Result<Option<TaskId>> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM link_check_tasks WHERE url_set = ?")
                .bind(url_set)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    Error::Database(DatabaseError::QueryFailed(format!(
                        "Failed to check existing link check task: {}",
                        e
                    )))
                })?;

        Ok(id.map(TaskId))
    }

    /// Get a task with the current status of every link
    ///
    /// Links are returned in submission order.
    pub async fn get_task(&self, id: TaskId) -> Result<LinkCheckTask> {
        let header = sqlx::query_as::<_, TaskRow>(
            "SELECT id, url_set, created_at FROM link_check_tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get link check task: {}",
                e
            )))
        })?
        .ok_or(Error::Task(TaskError::NotFound { id }))?;

        let rows = sqlx::query_as::<_, LinkStatusRow>(
            r#"
            SELECT task_id, url, position, status, updated_at
            FROM link_statuses
            WHERE task_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get link statuses: {}",
                e
            )))
        })?;

        let links = rows
            .into_iter()
            .map(|row| {
                let status = row.status.parse::<LinkStatus>().map_err(|e| {
                    Error::Database(DatabaseError::QueryFailed(format!(
                        "Invalid status for '{}' in task {}: {}",
                        row.url, row.task_id, e
                    )))
                })?;
                Ok(Link {
                    url: row.url,
                    status,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let created_at = chrono::DateTime::from_timestamp(header.created_at, 0).ok_or_else(|| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Invalid created_at {} for task {}",
                header.created_at, header.id
            )))
        })?;

        Ok(LinkCheckTask {
            id: TaskId(header.id),
            links,
            created_at,
        })
    }

    /// Update the status of one recorded `(task, url)` pair
    ///
    /// Never inserts: fails with [`TaskError::LinkNotFound`] when the task is
    /// absent or the URL was not part of it.
    pub async fn update_link_status(
        &self,
        id: TaskId,
        url: &str,
        status: LinkStatus,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let result = sqlx::query(
            "UPDATE link_statuses SET status = ?, updated_at = ? WHERE task_id = ? AND url = ?",
        )
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .bind(url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to update link status: {}",
                e
            )))
        })?;

        if result.rows_affected() == 0 {
            return Err(Error::Task(TaskError::LinkNotFound {
                id,
                url: url.to_string(),
            }));
        }

        Ok(())
    }

    /// Move a link out of `pending`/`unknown` into `status`
    ///
    /// Returns `Ok(false)` without writing when the link already holds a
    /// terminal status, so a result can never overwrite an earlier one.
    /// Fails with [`TaskError::LinkNotFound`] when there is no such row.
    pub async fn record_link_status(
        &self,
        id: TaskId,
        url: &str,
        status: LinkStatus,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = sqlx::query(
            r#"
            UPDATE link_statuses SET status = ?, updated_at = ?
            WHERE task_id = ? AND url = ? AND status IN (?, ?)
            "#,
        )
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .bind(url)
        .bind(LinkStatus::Pending.as_str())
        .bind(LinkStatus::Unknown.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to record link status: {}",
                e
            )))
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM link_statuses WHERE task_id = ? AND url = ?")
                .bind(id)
                .bind(url)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    Error::Database(DatabaseError::QueryFailed(format!(
                        "Failed to check link status: {}",
                        e
                    )))
                })?;

        match exists {
            Some(_) => Ok(false),
            None => Err(Error::Task(TaskError::LinkNotFound {
                id,
                url: url.to_string(),
            })),
        }
    }
}
