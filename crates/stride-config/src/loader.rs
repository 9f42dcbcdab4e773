//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;
use stride_core::StrideError;
use tracing::{debug, info, warn};

/// Prefix for environment overrides, e.g. `STRIDE__DATABASE__URL`.
const ENV_PREFIX: &str = "STRIDE";

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir`.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides, not committed
    /// 4. Environment variables with `STRIDE__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, StrideError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("STRIDE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_stride_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), StrideError> {
        if config.app.environment == "production" && !config.redis.enabled {
            warn!("Redis is disabled in production; every read will hit the database");
        }

        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            StrideError::Configuration(message)
        })
    }
}

fn config_error_to_stride_error(err: ConfigError) -> StrideError {
    StrideError::Configuration(err.to_string())
}
