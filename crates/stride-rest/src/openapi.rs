//! OpenAPI documentation.

use crate::controllers::health_controller::HealthResponse;
use stride_core::{ErrorResponse, TaskId, UserId};
use stride_service::{
    AddPointsRequest, AddTaskRequest, ModulePopularityResponse, SetHiddenRequest, SignUpRequest,
    TaskResponse, UpdateParticularsRequest, UpdateTimetableRequest, UpdateTokensRequest,
    UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Stride API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stride API",
        version = "1.0.0",
        description = "Study tracking API with a cache-aside read path",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Users
        crate::controllers::user_controller::sign_up,
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::add_points,
        crate::controllers::user_controller::update_particulars,
        crate::controllers::user_controller::update_timetable,
        crate::controllers::user_controller::update_tokens,
        crate::controllers::user_controller::delete_user,
        // Tasks
        crate::controllers::task_controller::add_task,
        crate::controllers::task_controller::list_tasks,
        crate::controllers::task_controller::set_hidden,
        crate::controllers::task_controller::delete_task,
        // Cached reads
        crate::controllers::cached_controller::leaderboard,
        crate::controllers::cached_controller::get_user,
        crate::controllers::cached_controller::list_user_tasks,
        crate::controllers::cached_controller::list_tasks,
        crate::controllers::cached_controller::get_task,
        // Stats
        crate::controllers::stats_controller::most_popular,
        // Health
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            TaskId,
            ErrorResponse,
            HealthResponse,
            SignUpRequest,
            AddPointsRequest,
            UpdateParticularsRequest,
            UpdateTimetableRequest,
            UpdateTokensRequest,
            UserResponse,
            AddTaskRequest,
            SetHiddenRequest,
            TaskResponse,
            ModulePopularityResponse,
        )
    ),
    tags(
        (name = "users", description = "User records and mutations"),
        (name = "tasks", description = "Task records and mutations"),
        (name = "cached", description = "Reads served through the cache"),
        (name = "stats", description = "Aggregate statistics"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
