//! Database connection pool management.

use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use stride_config::DatabaseConfig;
use stride_core::{Interface, StrideError, StrideResult};
use tracing::{info, warn};

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying MySQL pool.
    fn inner(&self) -> &MySqlPool;

    /// Deadline applied to every repository query.
    fn query_timeout(&self) -> Duration;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> StrideResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> StrideResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn new(config: &DatabaseConfig) -> StrideResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                StrideError::Database(format!("Failed to connect: {}", e))
            })?;

        info!(
            min = config.min_connections,
            max = config.max_connections,
            "MySQL connection pool established"
        );
        Ok(Self::with_pool(pool, config.query_timeout()))
    }

    /// Wraps a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Consumes the wrapper, returning the pool and timeout for DI parameters.
    #[must_use]
    pub fn into_parts(self) -> (MySqlPool, Duration) {
        (self.pool, self.query_timeout)
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    async fn health_check(&self) -> StrideResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StrideError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> StrideResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StrideError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}
