//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use stride_core::{StrideError, StrideResult};

/// Key-value cache store with per-entry expiration.
///
/// Values are JSON strings so the trait stays dyn-compatible. Every method
/// fails softly: an unreachable store yields `StrideError::Cache`, never a
/// panic, and callers in the cache-aside layer treat that as a miss.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> StrideResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL, replacing any previous value.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> StrideResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> StrideResult<bool>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> StrideResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed get/set on top of [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    ///
    /// A value that fails to deserialize is a `StrideError::Cache`, not a
    /// miss; callers decide how to treat it.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> StrideResult<Option<T>> {
        let Some(json) = self.get_raw(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StrideError::cache(format!("Malformed value under '{}': {}", key, e)))
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> StrideResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| StrideError::cache(format!("Cannot encode value for '{}': {}", key, e)))?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
