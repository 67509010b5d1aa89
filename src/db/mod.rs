//! Database layer for link-checker
//!
//! Handles SQLite persistence for link check tasks and per-link statuses.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] - Database lifecycle, schema migrations
//! - [`tasks`] - Task creation, lookup and link status updates
//!
//! ## Schema
//!
//! - `link_check_tasks` - one row per distinct URL set, unique on the
//!   canonical set representation
//! - `link_statuses` - one row per `(task_id, url)` pair

use crate::types::TaskId;
use sqlx::{FromRow, sqlite::SqlitePool};

mod migrations;
mod tasks;

/// Task header record from database
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    /// Unique database ID
    pub id: i64,
    /// Canonical URL set (JSON array of sorted, de-duplicated URLs)
    pub url_set: String,
    /// Unix timestamp when the task was first created
    pub created_at: i64,
}

/// Link status record from database
#[derive(Debug, Clone, FromRow)]
pub struct LinkStatusRow {
    /// Task this link belongs to
    pub task_id: i64,
    /// URL as submitted
    pub url: String,
    /// Position of the first occurrence in the submitted list
    pub position: i64,
    /// Status string (see [`LinkStatus::as_str`](crate::types::LinkStatus::as_str))
    pub status: String,
    /// Unix timestamp of the last status update
    pub updated_at: Option<i64>,
}

/// Outcome of [`Database::create_task`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedTask {
    /// Identifier of the new or existing task
    pub id: TaskId,
    /// False when an identical URL set already had a task
    pub created: bool,
}

/// Database handle for link-checker
pub struct Database {
    pool: SqlitePool,
}

/// Canonical identity of a URL list: sorted, de-duplicated, JSON encoded
///
/// Two lists with the same elements in any order (and any multiplicity)
/// produce the same key.
pub fn canonical_url_set(urls: &[String]) -> crate::Result<String> {
    let mut sorted: Vec<&str> = urls.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    Ok(serde_json::to_string(&sorted)?)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
