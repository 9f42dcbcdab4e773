//! Configuration validation.
//!
//! Collects every problem in one pass and reports them together.

use crate::{AppConfig, CacheBackend};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool cannot hold any connection.
    EmptyPool { name: String },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
    /// A view limit of zero would cache nothing.
    ZeroLimit { name: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::EmptyPool { name } => write!(f, "{} must be at least 1", name),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name } => {
                write!(f, "Timeout '{}' must be positive", name)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: json, pretty)", value)
            }
            Self::ZeroLimit { name } => write!(f, "{} must be greater than zero", name),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    const VALID_LOG_FORMATS: &'static [&'static str] = &["json", "pretty"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_cache(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;

        if db.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !db.url.starts_with("mysql://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql://".to_string(),
            });
        }

        if db.max_connections == 0 {
            errors.push(ConfigValidationError::EmptyPool {
                name: "database.max_connections".to_string(),
            });
        }
        if db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        }

        for (name, value) in [
            ("database.connect_timeout_secs", db.connect_timeout_secs),
            ("database.idle_timeout_secs", db.idle_timeout_secs),
            ("database.query_timeout_secs", db.query_timeout_secs),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                });
            }
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.redis.enabled || config.cache.backend != CacheBackend::Redis {
            return;
        }

        if !config.redis.url.starts_with("redis://") && !config.redis.url.starts_with("rediss://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            });
        }
        if config.redis.pool_size == 0 {
            errors.push(ConfigValidationError::EmptyPool {
                name: "redis.pool_size".to_string(),
            });
        }
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let cache = &config.cache;

        if cache.backend == CacheBackend::Memory && cache.memory_capacity == 0 {
            errors.push(ConfigValidationError::ZeroLimit {
                name: "cache.memory_capacity".to_string(),
            });
        }
        if cache.user_tasks_limit == 0 {
            errors.push(ConfigValidationError::ZeroLimit {
                name: "cache.user_tasks_limit".to_string(),
            });
        }
        if cache.all_tasks_limit == Some(0) {
            errors.push(ConfigValidationError::ZeroLimit {
                name: "cache.all_tasks_limit".to_string(),
            });
        }

        for (name, value) in [
            ("cache.user_ttl_secs", cache.user_ttl_secs),
            ("cache.task_ttl_secs", cache.task_ttl_secs),
            ("cache.all_users_ttl_secs", cache.all_users_ttl_secs),
            ("cache.all_tasks_ttl_secs", cache.all_tasks_ttl_secs),
            ("cache.user_tasks_ttl_secs", cache.user_tasks_ttl_secs),
            ("cache.popularity_ttl_secs", cache.popularity_ttl_secs),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                });
            }
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }

        let format = config.observability.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.observability.log_format.clone(),
            });
        }
    }
}
