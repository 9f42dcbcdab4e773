//! Tracing subscriber setup.

use stride_config::ObservabilityConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
#[must_use]
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!("{},tower_http=debug", config.log_level)
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let json = config.is_json();
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_target(true)))
        .with((!json).then(|| fmt::layer().with_target(true)))
        .init();
}
