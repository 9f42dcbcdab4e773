//! Read-through accessor for materialized views.

use super::{cache_keys, CacheExt, CacheInterface, CachePolicy};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use stride_core::{StrideResult, UserId};
use tracing::{debug, warn};

/// A cached, ordered collection with a fixed membership and ordering policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum View {
    /// All users, points descending.
    AllUsers,
    /// All tasks, newest first.
    AllTasks,
    /// One owner's most recent tasks, newest first.
    UserTasks(UserId),
    /// Task counts per module code, most popular first.
    ModulePopularity,
}

impl View {
    /// Cache key holding this view.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::AllUsers => cache_keys::all_users(),
            Self::AllTasks => cache_keys::all_tasks(),
            Self::UserTasks(owner) => cache_keys::user_tasks(owner),
            Self::ModulePopularity => cache_keys::module_popularity(),
        }
    }
}

/// Envelope stored under a view key.
///
/// The envelope's presence is what makes a hit, so an empty `items` is a
/// valid cached result and does not send the next read to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedList<T> {
    pub items: Vec<T>,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedList<T> {
    /// Wraps `items` stamped with the current time.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cached_at: Utc::now(),
        }
    }
}

/// Read-through cache for [`View`]s.
#[derive(Clone)]
pub struct ListCache {
    cache: Arc<dyn CacheInterface>,
    policy: CachePolicy,
}

impl ListCache {
    /// Creates an accessor over `cache`.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, policy: CachePolicy) -> Self {
        Self { cache, policy }
    }

    /// Returns the rows of `view`, reading through to `load` on a miss.
    ///
    /// `load` receives the view's row limit and must return rows in the
    /// view's order. The result is truncated to the limit before caching.
    pub async fn get_list<T, F, Fut>(&self, view: &View, load: F) -> StrideResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce(Option<usize>) -> Fut + Send,
        Fut: Future<Output = StrideResult<Vec<T>>> + Send,
    {
        let key = view.key();

        match self.cache.get::<CachedList<T>>(&key).await {
            Ok(Some(cached)) => {
                debug!(key = %key, count = cached.items.len(), "View cache hit");
                return Ok(cached.items);
            }
            Ok(None) => debug!(key = %key, "View cache miss"),
            Err(err) => warn!(key = %key, error = %err, "View cache read failed, loading from store"),
        }

        let limit = self.policy.view_limit(view);
        let mut items = load(limit).await?;
        if let Some(limit) = limit {
            items.truncate(limit);
        }

        let envelope = CachedList::new(items);
        if let Err(err) = self.cache.set(&key, &envelope, self.policy.view_ttl(view)).await {
            warn!(key = %key, error = %err, "Failed to cache view");
        }

        Ok(envelope.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheService;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn accessor() -> (ListCache, Arc<MemoryCacheService>) {
        let memory = Arc::new(MemoryCacheService::new(64).unwrap());
        let cache = ListCache::new(memory.clone(), CachePolicy::default());
        (cache, memory)
    }

    #[tokio::test]
    async fn test_empty_list_is_cached() {
        let (cache, _) = accessor();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let items: Vec<String> = cache
                .get_list(&View::AllTasks, |_| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
            assert!(items.is_empty());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loader_receives_limit_and_result_is_truncated() {
        let (cache, memory) = accessor();
        let owner = UserId::new();
        let view = View::UserTasks(owner);

        let items: Vec<u32> = cache
            .get_list(&view, |limit| async move {
                assert_eq!(limit, Some(6));
                Ok((0..10).collect())
            })
            .await
            .unwrap();
        assert_eq!(items, vec![0, 1, 2, 3, 4, 5]);

        let cached: CachedList<u32> = memory.get(&view.key()).await.unwrap().unwrap();
        assert_eq!(cached.items.len(), 6);
    }

    #[tokio::test]
    async fn test_unbounded_view_gets_no_limit() {
        let (cache, _) = accessor();

        let items: Vec<u32> = cache
            .get_list(&View::AllUsers, |limit| async move {
                assert!(limit.is_none());
                Ok((0..20).collect())
            })
            .await
            .unwrap();
        assert_eq!(items.len(), 20);
    }

    #[tokio::test]
    async fn test_bare_array_under_view_key_is_a_miss() {
        let (cache, memory) = accessor();
        memory
            .set_raw(&View::AllUsers.key(), "[1,2,3]", Duration::from_secs(60))
            .await
            .unwrap();

        let items: Vec<u32> = cache
            .get_list(&View::AllUsers, |_| async { Ok(vec![9]) })
            .await
            .unwrap();
        assert_eq!(items, vec![9]);
    }

    #[test]
    fn test_view_keys_are_distinct_per_owner() {
        let a = View::UserTasks(UserId::parse("a").unwrap());
        let b = View::UserTasks(UserId::parse("b").unwrap());
        assert_ne!(a.key(), b.key());
        assert_ne!(View::AllUsers.key(), View::AllTasks.key());
    }
}
