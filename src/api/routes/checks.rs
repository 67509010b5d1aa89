//! Link checking handlers.

use super::{CheckLinksRequest, CheckLinksResponse, invalid_body};
use crate::api::AppState;
use crate::error::Error;
use crate::types::TaskId;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// POST /api/check - Check a list of links
///
/// Blocks until every link has been probed, then returns the stored statuses.
/// Submitting the same set of links again returns the same task.
#[utoipa::path(
    post,
    path = "/api/check",
    tag = "checks",
    request_body = CheckLinksRequest,
    responses(
        (status = 200, description = "Links checked", body = CheckLinksResponse),
        (status = 400, description = "Empty, oversized or malformed link list", body = crate::error::ApiError),
        (status = 500, description = "Task could not be created", body = crate::error::ApiError)
    )
)]
pub async fn check_links(
    State(state): State<AppState>,
    payload: Result<Json<CheckLinksRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection).into_response(),
    };

    let max_links = state.config.server.api.max_links_per_request;
    if request.links.is_empty() {
        return Error::Validation("links array is empty".to_string()).into_response();
    }
    if request.links.len() > max_links {
        return Error::Validation(format!(
            "too many links in task: {} (maximum {})",
            request.links.len(),
            max_links
        ))
        .into_response();
    }

    let id = match state.checker.check_links(&request.links).await {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.checker.get_task_results(id).await {
        Ok(task) => (
            StatusCode::OK,
            Json(CheckLinksResponse {
                links: task.status_map(),
                links_num: id,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(task_id = id.0, error = %e, "Failed to load checked task");
            e.into_response()
        }
    }
}

/// GET /api/tasks/:id - Get a task with the current status of every link
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "checks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task with link statuses in submission order", body = crate::types::LinkCheckTask),
        (status = 404, description = "Task not found", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn get_task(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.checker.get_task_results(TaskId(id)).await {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(e) => e.into_response(),
    }
}
