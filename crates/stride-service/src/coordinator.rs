//! Cache upkeep after committed writes.
//!
//! The primary store is the source of truth. Once a write has committed, the
//! coordinator brings every cache entry derived from the written entity back
//! in line with it, patching in place where that is exact and deleting where
//! it is not:
//!
//! | Write         | Snapshot  | Owner's task list             | Global lists |
//! |---------------|-----------|-------------------------------|--------------|
//! | create        | write     | insert at front, if cached    | delete       |
//! | field update  | overwrite | replace by id, if present     | delete       |
//! | delete        | delete    | untouched                     | delete       |
//!
//! Cache failures never fail the write. Each one is logged and counted, and
//! an owner list whose patch could not complete is deleted instead.
//!
//! The module popularity aggregate is left to expire on its own.
//!
//! Owner-list patches are read-modify-write without a lock. Concurrent writes
//! for the same owner can drop one patch from the cached list until it expires.

use crate::cache::{
    cache_keys, CacheExt, CacheInterface, CachePolicy, CachedList, EntityKind, View,
};
use serde::Serialize;
use std::sync::Arc;
use stride_core::{Entity, Owned, Task, TaskId, User, UserId};
use tracing::{debug, warn};

/// Outcome of one coordinator pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries written or patched.
    pub written: usize,
    /// Entries deleted (including fallback deletions).
    pub deleted: usize,
    /// Cache operations that failed and were swallowed.
    pub failed: usize,
}

impl SyncReport {
    /// Returns true if every cache operation succeeded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// How an owner list is patched.
#[derive(Clone, Copy)]
enum ListPatch<'a> {
    Prepend(&'a Task),
    Replace(&'a Task),
}

/// Applies cache updates for committed store writes.
#[derive(Clone)]
pub struct MutationCoordinator {
    cache: Arc<dyn CacheInterface>,
    policy: CachePolicy,
}

impl MutationCoordinator {
    /// Creates a coordinator over `cache`.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, policy: CachePolicy) -> Self {
        Self { cache, policy }
    }

    /// A user was inserted.
    pub async fn user_created(&self, user: &User) -> SyncReport {
        self.user_written(user).await
    }

    /// A user's fields changed; `user` is the row as stored after the write.
    pub async fn user_updated(&self, user: &User) -> SyncReport {
        self.user_written(user).await
    }

    /// A user was deleted.
    pub async fn user_deleted(&self, id: &UserId) -> SyncReport {
        let mut report = SyncReport::default();
        self.delete_key(&cache_keys::user_by_id(id), &mut report).await;
        self.delete_key(&View::AllUsers.key(), &mut report).await;
        finish("user_deleted", id.as_str(), report)
    }

    /// A task was inserted.
    pub async fn task_created(&self, task: &Task) -> SyncReport {
        let mut report = SyncReport::default();
        self.write_snapshot(EntityKind::Task, task.id.as_str(), task, &mut report)
            .await;
        self.patch_owner_list(ListPatch::Prepend(task), &mut report)
            .await;
        self.delete_key(&View::AllTasks.key(), &mut report).await;
        finish("task_created", task.id.as_str(), report)
    }

    /// A task's fields changed; `task` is the row as stored after the write.
    pub async fn task_updated(&self, task: &Task) -> SyncReport {
        let mut report = SyncReport::default();
        self.write_snapshot(EntityKind::Task, task.id.as_str(), task, &mut report)
            .await;
        self.patch_owner_list(ListPatch::Replace(task), &mut report)
            .await;
        self.delete_key(&View::AllTasks.key(), &mut report).await;
        finish("task_updated", task.id.as_str(), report)
    }

    /// A task was deleted. The owner's list keeps it until the list expires.
    pub async fn task_deleted(&self, id: &TaskId) -> SyncReport {
        let mut report = SyncReport::default();
        self.delete_key(&cache_keys::task_by_id(id), &mut report).await;
        self.delete_key(&View::AllTasks.key(), &mut report).await;
        finish("task_deleted", id.as_str(), report)
    }

    async fn user_written(&self, user: &User) -> SyncReport {
        let mut report = SyncReport::default();
        self.write_snapshot(EntityKind::User, user.id.as_str(), user, &mut report)
            .await;
        self.delete_key(&View::AllUsers.key(), &mut report).await;
        finish("user_written", user.id.as_str(), report)
    }

    async fn write_snapshot<T>(&self, kind: EntityKind, id: &str, value: &T, report: &mut SyncReport)
    where
        T: Serialize + Send + Sync,
    {
        let key = cache_keys::entity(kind, id);
        match self.cache.set(&key, value, self.policy.entity_ttl(kind)).await {
            Ok(()) => report.written += 1,
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to write entity snapshot");
                report.failed += 1;
                // A stale snapshot must not outlive the failed overwrite
                self.delete_key(&key, report).await;
            }
        }
    }

    async fn delete_key(&self, key: &str, report: &mut SyncReport) {
        match self.cache.delete(key).await {
            Ok(_) => report.deleted += 1,
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to delete cache entry");
                report.failed += 1;
            }
        }
    }

    /// Patches the owner's cached task list, if there is one.
    ///
    /// An absent list stays absent. If the list cannot be read, decoded or
    /// written back, the key is deleted so the next read rebuilds it.
    async fn patch_owner_list(&self, patch: ListPatch<'_>, report: &mut SyncReport) {
        let task = match patch {
            ListPatch::Prepend(task) | ListPatch::Replace(task) => task,
        };
        let view = View::UserTasks(task.owner_id().clone());
        let key = view.key();

        let mut list = match self.cache.get::<CachedList<Task>>(&key).await {
            Ok(Some(list)) => list,
            Ok(None) => {
                debug!(key = %key, "Owner task list not cached, leaving absent");
                return;
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to read owner task list, invalidating");
                report.failed += 1;
                self.delete_key(&key, report).await;
                return;
            }
        };

        match patch {
            ListPatch::Prepend(task) => {
                list.items.retain(|item| item.id() != task.id());
                list.items.insert(0, task.clone());
                if let Some(limit) = self.policy.view_limit(&view) {
                    list.items.truncate(limit);
                }
            }
            ListPatch::Replace(task) => {
                let Some(slot) = list.items.iter_mut().find(|item| item.id() == task.id()) else {
                    debug!(key = %key, task_id = %task.id, "Task not in owner list, nothing to patch");
                    return;
                };
                *slot = task.clone();
            }
        }

        match self.cache.set(&key, &list, self.policy.view_ttl(&view)).await {
            Ok(()) => report.written += 1,
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to write owner task list, invalidating");
                report.failed += 1;
                self.delete_key(&key, report).await;
            }
        }
    }
}

fn finish(mutation: &'static str, id: &str, report: SyncReport) -> SyncReport {
    if report.is_clean() {
        debug!(mutation, id, written = report.written, deleted = report.deleted, "Cache synced");
    } else {
        warn!(
            mutation,
            id,
            written = report.written,
            deleted = report.deleted,
            failed = report.failed,
            "Cache sync incomplete"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheService;
    use async_trait::async_trait;
    use std::time::Duration;
    use stride_core::{StrideError, StrideResult};

    /// Reads and deletes reach the inner cache; every write is rejected.
    struct ReadOnlyCache(Arc<MemoryCacheService>);

    #[async_trait]
    impl CacheInterface for ReadOnlyCache {
        async fn get_raw(&self, key: &str) -> StrideResult<Option<String>> {
            self.0.get_raw(key).await
        }

        async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> StrideResult<()> {
            Err(StrideError::cache("READONLY replica"))
        }

        async fn delete(&self, key: &str) -> StrideResult<bool> {
            self.0.delete(key).await
        }

        async fn exists(&self, key: &str) -> StrideResult<bool> {
            self.0.exists(key).await
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn owner() -> User {
        User::new(
            "Grace".to_string(),
            "Hopper".to_string(),
            "grace@example.com".to_string(),
            "hash".to_string(),
        )
    }

    fn task_for(owner: &User, name: &str) -> Task {
        Task::new(owner, name.to_string(), "CS2030".to_string(), "30".to_string())
    }

    fn setup() -> (MutationCoordinator, Arc<MemoryCacheService>) {
        let memory = Arc::new(MemoryCacheService::new(64).unwrap());
        let coordinator = MutationCoordinator::new(memory.clone(), CachePolicy::default());
        (coordinator, memory)
    }

    async fn seed_list(memory: &MemoryCacheService, owner: &UserId, items: Vec<Task>) {
        memory
            .set(&cache_keys::user_tasks(owner), &CachedList::new(items), Duration::from_secs(60))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_user_created_writes_snapshot_and_drops_leaderboard() {
        let (coordinator, memory) = setup();
        let user = owner();
        memory
            .set(&View::AllUsers.key(), &CachedList::new(Vec::<User>::new()), Duration::from_secs(60))
            .await
            .unwrap();

        let report = coordinator.user_created(&user).await;

        assert!(report.is_clean());
        let cached: Option<User> = memory.get(&cache_keys::user_by_id(&user.id)).await.unwrap();
        assert_eq!(cached, Some(user));
        assert!(!memory.exists(&View::AllUsers.key()).await.unwrap());
    }

    #[tokio::test]
    async fn test_user_deleted_removes_snapshot() {
        let (coordinator, memory) = setup();
        let user = owner();
        coordinator.user_created(&user).await;

        coordinator.user_deleted(&user.id).await;

        assert!(!memory.exists(&cache_keys::user_by_id(&user.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_task_created_prepends_to_cached_owner_list() {
        let (coordinator, memory) = setup();
        let owner = owner();
        let existing: Vec<Task> = (0..6).map(|i| task_for(&owner, &format!("t{i}"))).collect();
        seed_list(&memory, &owner.id, existing.clone()).await;

        let fresh = task_for(&owner, "fresh");
        coordinator.task_created(&fresh).await;

        let list: CachedList<Task> = memory
            .get(&cache_keys::user_tasks(&owner.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(list.items.len(), 6);
        assert_eq!(list.items[0].id, fresh.id);
        assert_eq!(list.items[1..], existing[..5]);
    }

    #[tokio::test]
    async fn test_task_created_leaves_uncached_owner_list_absent() {
        let (coordinator, memory) = setup();
        let owner = owner();

        coordinator.task_created(&task_for(&owner, "first")).await;

        assert!(!memory.exists(&cache_keys::user_tasks(&owner.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_task_updated_replaces_only_that_member() {
        let (coordinator, memory) = setup();
        let owner = owner();
        let a = task_for(&owner, "a");
        let b = task_for(&owner, "b");
        seed_list(&memory, &owner.id, vec![b.clone(), a.clone()]).await;

        let mut hidden = a.clone();
        hidden.set_hidden(true);
        coordinator.task_updated(&hidden).await;

        let list: CachedList<Task> = memory
            .get(&cache_keys::user_tasks(&owner.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(list.items, vec![b, hidden.clone()]);
        let snapshot: Option<Task> = memory.get(&cache_keys::task_by_id(&a.id)).await.unwrap();
        assert_eq!(snapshot, Some(hidden));
    }

    #[tokio::test]
    async fn test_task_deleted_leaves_owner_list_untouched() {
        let (coordinator, memory) = setup();
        let owner = owner();
        let task = task_for(&owner, "gone");
        seed_list(&memory, &owner.id, vec![task.clone()]).await;
        memory
            .set(&View::AllTasks.key(), &CachedList::new(vec![task.clone()]), Duration::from_secs(60))
            .await
            .unwrap();

        coordinator.task_deleted(&task.id).await;

        assert!(memory.exists(&cache_keys::user_tasks(&owner.id)).await.unwrap());
        assert!(!memory.exists(&View::AllTasks.key()).await.unwrap());
        assert!(!memory.exists(&cache_keys::task_by_id(&task.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_unreadable_owner_list_is_invalidated() {
        let (coordinator, memory) = setup();
        let owner = owner();
        memory
            .set_raw(&cache_keys::user_tasks(&owner.id), "garbage", Duration::from_secs(60))
            .await
            .unwrap();

        let report = coordinator.task_created(&task_for(&owner, "x")).await;

        assert_eq!(report.failed, 1);
        assert!(!memory.exists(&cache_keys::user_tasks(&owner.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_writes_fall_back_to_deleting_snapshot_and_owner_list() {
        let (_, memory) = setup();
        let owner = owner();
        let task = task_for(&owner, "a");
        seed_list(&memory, &owner.id, vec![task.clone()]).await;
        memory
            .set(&cache_keys::task_by_id(&task.id), &task, Duration::from_secs(60))
            .await
            .unwrap();
        let coordinator = MutationCoordinator::new(
            Arc::new(ReadOnlyCache(memory.clone())),
            CachePolicy::default(),
        );

        let mut hidden = task.clone();
        hidden.set_hidden(true);
        let report = coordinator.task_updated(&hidden).await;

        assert_eq!(report.failed, 2);
        assert_eq!(report.written, 0);
        assert!(!memory.exists(&cache_keys::task_by_id(&task.id)).await.unwrap());
        assert!(!memory.exists(&cache_keys::user_tasks(&owner.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_popularity_is_not_invalidated() {
        let (coordinator, memory) = setup();
        let owner = owner();
        memory
            .set_raw(&View::ModulePopularity.key(), "{\"items\":[],\"cached_at\":\"2024-01-01T00:00:00Z\"}", Duration::from_secs(60))
            .await
            .unwrap();

        coordinator.task_created(&task_for(&owner, "x")).await;

        assert!(memory.exists(&View::ModulePopularity.key()).await.unwrap());
    }
}
