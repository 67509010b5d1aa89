//! Report handlers.

use super::{GenerateReportRequest, invalid_body};
use crate::api::AppState;
use crate::error::Error;
use crate::types::TaskId;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// POST /api/report - Render a report over previously checked tasks
///
/// Unknown task ids are skipped; the request fails only when none resolve.
#[utoipa::path(
    post,
    path = "/api/report",
    tag = "reports",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Rendered report", body = String, content_type = "text/plain"),
        (status = 400, description = "Empty, oversized or malformed id list", body = crate::error::ApiError),
        (status = 404, description = "None of the tasks exist", body = crate::error::ApiError),
        (status = 500, description = "Report could not be rendered", body = crate::error::ApiError)
    )
)]
pub async fn generate_report(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection).into_response(),
    };

    let max_tasks = state.config.server.api.max_report_tasks;
    if request.links_list.is_empty() {
        return Error::Validation("links list is empty".to_string()).into_response();
    }
    if request.links_list.len() > max_tasks {
        return Error::Validation(format!(
            "links list is too big: {} (maximum {})",
            request.links_list.len(),
            max_tasks
        ))
        .into_response();
    }

    let ids: Vec<TaskId> = request.links_list.into_iter().map(TaskId).collect();

    match state
        .checker
        .generate_report(&ids, state.renderer.as_ref())
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.renderer.content_type())],
            report,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
