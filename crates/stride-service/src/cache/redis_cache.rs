//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use stride_core::{StrideError, StrideResult};
use tracing::debug;

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> StrideResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| StrideError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(StrideError::cache("Cache is disabled")),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> StrideResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| StrideError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> StrideResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| StrideError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrideResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| StrideError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> StrideResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| StrideError::cache(format!("Failed to check key '{}': {}", key, e)))?;

        Ok(exists)
    }
}
