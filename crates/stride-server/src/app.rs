//! HTTP serve loop.

use crate::di::{self, Services, StrideModule};
use stride_config::AppConfig;
use stride_core::{StrideError, StrideResult};
use stride_rest::{create_router, AppState};
use stride_service::CachePolicy;
use tokio::signal;
use tracing::{info, warn};

/// Serves the REST API until a shutdown signal arrives, then closes the pool.
pub async fn serve(config: &AppConfig, module: &StrideModule) -> StrideResult<()> {
    let policy = CachePolicy::from_config(&config.cache);
    let services = Services::from_module(module, &policy);
    let state = AppState::new(services.user_service, services.task_service);
    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StrideError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
    info!("Starting REST server on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StrideError::Internal(format!("REST server error: {}", e)))?;

    di::database_pool(module).close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
