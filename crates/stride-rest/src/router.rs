//! Main application router.

use crate::{
    controllers::{
        cached_controller, health_controller, stats_controller, task_controller, user_controller,
    },
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use stride_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .nest("/tasks", task_controller::router())
        .nest("/cached", cached_controller::router())
        .nest("/stats", stats_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Stride API v1"
}
