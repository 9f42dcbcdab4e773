//! In-process cache with LRU eviction.
//!
//! Mirrors the Redis backend's behavior for single-instance deployments and
//! tests: per-entry TTL and soft failure semantics.

use super::CacheInterface;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use stride_core::{StrideError, StrideResult};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache service.
///
/// Expired entries are dropped lazily when touched. When the store is full
/// the least recently used entry is evicted.
#[derive(Clone)]
pub struct MemoryCacheService {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCacheService {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> StrideResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| StrideError::Configuration("Cache capacity must be > 0".to_string()))?;
        Ok(Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        })
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.iter().filter(|(_, entry)| !entry.is_expired()).count()
    }

    /// Returns true if no live entries remain.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl std::fmt::Debug for MemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> StrideResult<Option<String>> {
        // LruCache::get updates recency, so reads take the write lock.
        let mut store = self.store.write().await;

        let (value, expired) = match store.get(key) {
            Some(entry) if entry.is_expired() => (None, true),
            Some(entry) => (Some(entry.value.clone()), false),
            None => (None, false),
        };
        if expired {
            store.pop(key);
        }

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> StrideResult<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_string(), ttl));
        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrideResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.pop(key).is_some_and(|entry| !entry.is_expired());
        debug!("Deleted key '{}': {}", key, deleted);
        Ok(deleted)
    }

    async fn exists(&self, key: &str) -> StrideResult<bool> {
        let store = self.store.read().await;
        Ok(store.peek(key).is_some_and(|entry| !entry.is_expired()))
    }
}
