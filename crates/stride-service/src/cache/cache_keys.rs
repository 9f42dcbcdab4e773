//! Cache key generators for consistent key naming.
//!
//! Every key lives under the `stride:cache` prefix, so one
//! `stride:cache:*` pattern covers everything this service writes.

use stride_core::{TaskId, UserId};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "stride:cache";

/// Kinds of entity that are cached as individual snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Task,
}

impl EntityKind {
    /// Key segment for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Task => "task",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key for one entity snapshot.
#[must_use]
pub fn entity(kind: EntityKind, id: &str) -> String {
    format!("{}:{}:{}", CACHE_PREFIX, kind.as_str(), id)
}

/// Key for a user snapshot.
#[must_use]
pub fn user_by_id(id: &UserId) -> String {
    entity(EntityKind::User, id.as_str())
}

/// Key for a task snapshot.
#[must_use]
pub fn task_by_id(id: &TaskId) -> String {
    entity(EntityKind::Task, id.as_str())
}

/// Key for one owner's recent tasks.
#[must_use]
pub fn user_tasks(owner: &UserId) -> String {
    format!("{}:user-tasks:{}", CACHE_PREFIX, owner)
}

/// Key for the points leaderboard.
#[must_use]
pub fn all_users() -> String {
    format!("{}:users:all", CACHE_PREFIX)
}

/// Key for the activity feed.
#[must_use]
pub fn all_tasks() -> String {
    format!("{}:tasks:all", CACHE_PREFIX)
}

/// Key for the module popularity aggregate.
#[must_use]
pub fn module_popularity() -> String {
    format!("{}:stats:module-popularity", CACHE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_keys() {
        let user = UserId::parse("u1").unwrap();
        let task = TaskId::parse("t1").unwrap();
        assert_eq!(user_by_id(&user), "stride:cache:user:u1");
        assert_eq!(task_by_id(&task), "stride:cache:task:t1");
    }

    #[test]
    fn test_same_id_different_kind_never_collides() {
        assert_ne!(entity(EntityKind::User, "x"), entity(EntityKind::Task, "x"));
    }

    #[test]
    fn test_view_keys() {
        let owner = UserId::parse("abc").unwrap();
        assert_eq!(user_tasks(&owner), "stride:cache:user-tasks:abc");
        assert_eq!(all_users(), "stride:cache:users:all");
        assert_eq!(all_tasks(), "stride:cache:tasks:all");
        assert_eq!(module_popularity(), "stride:cache:stats:module-popularity");
    }

    #[test]
    fn test_user_snapshot_and_task_list_keys_are_distinct() {
        let id = UserId::parse("abc").unwrap();
        assert_ne!(user_by_id(&id), user_tasks(&id));
    }
}
