//! Read-through accessor for single entities.

use super::{cache_keys, CacheExt, CacheInterface, CachePolicy, EntityKind};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use stride_core::StrideResult;
use tracing::{debug, warn};

/// Read-through cache for one entity per key.
///
/// A hit with a well-formed value never touches the store. On a miss the
/// loader runs once; a found entity is written back with its kind's TTL, an
/// absent one is not cached, so lookups of unknown ids always reach the store.
#[derive(Clone)]
pub struct EntityCache {
    cache: Arc<dyn CacheInterface>,
    policy: CachePolicy,
}

impl EntityCache {
    /// Creates an accessor over `cache`.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, policy: CachePolicy) -> Self {
        Self { cache, policy }
    }

    /// Returns the entity of `kind` with `id`, reading through to `load` on a miss.
    ///
    /// Cache failures are logged and treated as a miss. Only errors from
    /// `load` reach the caller.
    pub async fn get<T, F, Fut>(&self, kind: EntityKind, id: &str, load: F) -> StrideResult<Option<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = StrideResult<Option<T>>> + Send,
    {
        let key = cache_keys::entity(kind, id);

        match self.cache.get::<T>(&key).await {
            Ok(Some(entity)) => {
                debug!(%kind, id, "Entity cache hit");
                return Ok(Some(entity));
            }
            Ok(None) => debug!(%kind, id, "Entity cache miss"),
            Err(err) => warn!(%kind, id, error = %err, "Entity cache read failed, loading from store"),
        }

        let entity = load().await?;

        if let Some(ref value) = entity {
            if let Err(err) = self.cache.set(&key, value, self.policy.entity_ttl(kind)).await {
                warn!(%kind, id, error = %err, "Failed to cache entity");
            }
        }

        Ok(entity)
    }
}
