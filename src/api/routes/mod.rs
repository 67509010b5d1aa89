//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`checks`] - Link checking and task lookup
//! - [`reports`] - Report generation over stored tasks
//! - [`system`] - Health and OpenAPI

use crate::error::Error;
use crate::types::TaskId;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod checks;
mod reports;
mod system;

// Re-export all handlers so `routes::function_name` works
pub use checks::*;
pub use reports::*;
pub use system::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for POST /api/check
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CheckLinksRequest {
    /// URLs to check, in the order they should be reported
    pub links: Vec<String>,
}

/// Response body for POST /api/check
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CheckLinksResponse {
    /// URL to status ("available", "not available", ...)
    pub links: BTreeMap<String, String>,
    /// Identifier of the task holding these results
    #[schema(value_type = i64)]
    pub links_num: TaskId,
}

/// Request body for POST /api/report
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GenerateReportRequest {
    /// Task identifiers to include, in report order
    pub links_list: Vec<i64>,
}

/// Turn a JSON extractor rejection into a 400 with the standard error body
pub(crate) fn invalid_body(rejection: JsonRejection) -> Error {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    Error::Validation(format!("invalid request body: {}", rejection.body_text()))
}
