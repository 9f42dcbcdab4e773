//! Aggregate statistics.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use stride_service::ModulePopularityResponse;
use tracing::debug;

/// Creates the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/mostpopular", get(most_popular))
}

/// Task counts per module code, most popular first. Recent tasks show up
/// once the cached aggregate expires.
#[utoipa::path(
    get,
    path = "/stats/mostpopular",
    tag = "stats",
    responses(
        (status = 200, description = "Module popularity", body = [ModulePopularityResponse])
    )
)]
pub async fn most_popular(State(state): State<AppState>) -> ApiResult<Vec<ModulePopularityResponse>> {
    debug!("Most popular modules request");

    let response = state.task_service.most_popular_modules().await?;
    ok(response)
}
