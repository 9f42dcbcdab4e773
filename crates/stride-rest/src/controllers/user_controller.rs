//! User controller: store-backed reads and all user mutations.

use super::parse_user_id;
use crate::{
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use stride_core::ErrorResponse;
use stride_service::{
    AddPointsRequest, SignUpRequest, UpdateParticularsRequest, UpdateTimetableRequest,
    UpdateTokensRequest, UserResponse,
};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(sign_up))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/points", post(add_points))
        .route("/:id/particulars", patch(update_particulars))
        .route("/:id/timetable", put(update_timetable))
        .route("/:id/tokens", put(update_tokens))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Sign up request: {}", request.email);

    let response = state.user_service.sign_up(request).await?;
    Ok(created(response))
}

/// List all users ranked by points, read from the primary store.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Users ranked by points", body = [UserResponse])
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let response = state.user_service.list_users_uncached().await?;
    ok(response)
}

/// Get a user by ID, read from the primary store.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
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
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user_uncached(&user_id).await?;
    ok(response)
}

/// Add to a user's points.
#[utoipa::path(
    post,
    path = "/users/{id}/points",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = AddPointsRequest,
    responses(
        (status = 200, description = "Points added", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn add_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddPointsRequest>,
) -> ApiResult<UserResponse> {
    debug!("Add points request: {} +{}", id, request.points);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.add_points(&user_id, request).await?;
    ok(response)
}

/// Replace any subset of a user's particulars.
#[utoipa::path(
    patch,
    path = "/users/{id}/particulars",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateParticularsRequest,
    responses(
        (status = 200, description = "Particulars updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_particulars(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateParticularsRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update particulars request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_particulars(&user_id, request).await?;
    ok(response)
}

/// Set a user's timetable link.
#[utoipa::path(
    put,
    path = "/users/{id}/timetable",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateTimetableRequest,
    responses(
        (status = 200, description = "Timetable updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTimetableRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update timetable request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_timetable(&user_id, request).await?;
    ok(response)
}

/// Store newly issued tokens for a user.
#[utoipa::path(
    put,
    path = "/users/{id}/tokens",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateTokensRequest,
    responses(
        (status = 204, description = "Tokens stored"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_tokens(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTokensRequest>,
) -> Result<StatusCode, AppError> {
    debug!("Update tokens request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.update_tokens(&user_id, request).await?;
    Ok(no_content())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(&user_id).await?;
    Ok(no_content())
}
