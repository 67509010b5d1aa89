//! Core types for link-checker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Unique identifier for a link check task
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TaskId> for i64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl sqlx::Type<sqlx::Sqlite> for TaskId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for TaskId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for TaskId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// Reachability status of a single link
///
/// `Pending` and `Unknown` are the only initial values; `Available` and
/// `NotAvailable` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LinkStatus {
    /// Recorded but not yet probed
    #[serde(rename = "pending")]
    Pending,
    /// Probe got a 2xx/3xx response
    #[serde(rename = "available")]
    Available,
    /// Probe failed or got a non-success response
    #[serde(rename = "not available")]
    NotAvailable,
    /// Placeholder for un-probed or ambiguous entries
    #[serde(rename = "unknown")]
    Unknown,
}

impl LinkStatus {
    /// String form used in the database and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Pending => "pending",
            LinkStatus::Available => "available",
            LinkStatus::NotAvailable => "not available",
            LinkStatus::Unknown => "unknown",
        }
    }

    /// Whether the status can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, LinkStatus::Available | LinkStatus::NotAvailable)
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LinkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LinkStatus::Pending),
            "available" => Ok(LinkStatus::Available),
            "not available" => Ok(LinkStatus::NotAvailable),
            "unknown" => Ok(LinkStatus::Unknown),
            other => Err(format!("unrecognized link status '{}'", other)),
        }
    }
}

/// A URL as submitted together with its current status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// URL exactly as supplied by the caller
    pub url: String,
    /// Current reachability status
    pub status: LinkStatus,
}

/// A persisted batch of links checked together
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LinkCheckTask {
    /// Task identifier assigned on creation
    pub id: TaskId,
    /// Links in submission order (one entry per distinct URL)
    pub links: Vec<Link>,
    /// When the task was first created
    pub created_at: DateTime<Utc>,
}

impl LinkCheckTask {
    /// Map of URL to status string, as exposed by the HTTP API
    pub fn status_map(&self) -> BTreeMap<String, String> {
        self.links
            .iter()
            .map(|link| (link.url.clone(), link.status.as_str().to_string()))
            .collect()
    }

    /// Number of links that have not reached a terminal status
    pub fn pending_count(&self) -> usize {
        self.links
            .iter()
            .filter(|link| !link.status.is_terminal())
            .count()
    }
}
