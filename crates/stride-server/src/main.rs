//! # Stride Server
//!
//! Loads configuration, connects to MySQL and the cache store, and serves
//! the REST API.

use stride_config::{ConfigLoader, ObservabilityConfig};
use stride_core::StrideResult;
use stride_server::{app, di, logging::init_logging};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    info!("Starting Stride server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);
    info!("Cache backend: {:?}", config.cache.backend);

    if let Err(e) = run(&config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: &stride_config::AppConfig) -> StrideResult<()> {
    let module = di::build_module(config).await?;
    app::serve(config, &module).await
}
