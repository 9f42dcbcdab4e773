//! Cached read endpoints.

use super::{parse_task_id, parse_user_id};
use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use stride_core::ErrorResponse;
use stride_service::{TaskResponse, UserResponse};
use tracing::debug;

/// Creates the cached read router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(leaderboard))
        .route("/users/:id", get(get_user))
        .route("/users/:id/tasks", get(list_user_tasks))
        .route("/tasks", get(list_tasks))
        .route("/tasks/:id", get(get_task))
}

/// Users ranked by points.
#[utoipa::path(
    get,
    path = "/cached/users",
    tag = "cached",
    responses(
        (status = 200, description = "Users ranked by points", body = [UserResponse])
    )
)]
pub async fn leaderboard(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("Cached leaderboard request");

    let response = state.user_service.leaderboard().await?;
    ok(response)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/cached/users/{id}",
    tag = "cached",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Cached get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(&user_id).await?;
    ok(response)
}

/// A user's most recent tasks.
#[utoipa::path(
    get,
    path = "/cached/users/{id}/tasks",
    tag = "cached",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Recent tasks, newest first", body = [TaskResponse])
    )
)]
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<TaskResponse>> {
    debug!("Cached user tasks request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.task_service.list_user_tasks(&user_id).await?;
    ok(response)
}

/// Activity feed, newest first.
#[utoipa::path(
    get,
    path = "/cached/tasks",
    tag = "cached",
    responses(
        (status = 200, description = "All tasks, newest first", body = [TaskResponse])
    )
)]
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Vec<TaskResponse>> {
    debug!("Cached task feed request");

    let response = state.task_service.list_tasks().await?;
    ok(response)
}

/// Get a task by ID.
#[utoipa::path(
    get,
    path = "/cached/tasks/{id}",
    tag = "cached",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TaskResponse> {
    debug!("Cached get task request: {}", id);

    let task_id = parse_task_id(&id)?;
    let response = state.task_service.get_task(&task_id).await?;
    ok(response)
}
