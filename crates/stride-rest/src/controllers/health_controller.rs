//! Process health checks. Neither endpoint touches the store or the cache.

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
}

/// Reports that the API process is up, with its build version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "API process is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "stride",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive")
    )
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
