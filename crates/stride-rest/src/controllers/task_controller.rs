//! Task controller: store-backed feed and all task mutations.

use super::parse_task_id;
use crate::{
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use stride_core::ErrorResponse;
use stride_service::{AddTaskRequest, SetHiddenRequest, TaskResponse};
use tracing::debug;

/// Creates the task router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(add_task))
        .route("/:id", delete(delete_task))
        .route("/:id/hidden", put(set_hidden))
}

/// Log a task for a user.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = AddTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    )
)]
pub async fn add_task(
    State(state): State<AppState>,
    Json(request): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaskResponse>>), AppError> {
    debug!("Add task request for user: {}", request.user_id);

    let response = state.task_service.add_task(request).await?;
    Ok(created(response))
}

/// Activity feed, newest first, read from the primary store.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks, newest first", body = [TaskResponse])
    )
)]
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Vec<TaskResponse>> {
    debug!("List tasks request");

    let response = state.task_service.list_tasks_uncached().await?;
    ok(response)
}

/// Hide or unhide a task.
#[utoipa::path(
    put,
    path = "/tasks/{id}/hidden",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = SetHiddenRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
pub async fn set_hidden(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetHiddenRequest>,
) -> ApiResult<TaskResponse> {
    debug!("Set hidden request: {} -> {}", id, request.hidden);

    let task_id = parse_task_id(&id)?;
    let response = state.task_service.set_hidden(&task_id, request).await?;
    ok(response)
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete task request: {}", id);

    let task_id = parse_task_id(&id)?;
    state.task_service.delete_task(&task_id).await?;
    Ok(no_content())
}
