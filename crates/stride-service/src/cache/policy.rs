//! Expiration and size policy for cached entries and views.

use super::{EntityKind, View};
use std::time::Duration;
use stride_config::CacheConfig;

/// TTLs per entity kind and per view, plus view row limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub user_ttl: Duration,
    pub task_ttl: Duration,
    pub all_users_ttl: Duration,
    pub all_tasks_ttl: Duration,
    pub user_tasks_ttl: Duration,
    pub popularity_ttl: Duration,
    pub user_tasks_limit: usize,
    pub all_tasks_limit: Option<usize>,
}

impl CachePolicy {
    /// Builds the policy from configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            user_ttl: Duration::from_secs(config.user_ttl_secs),
            task_ttl: Duration::from_secs(config.task_ttl_secs),
            all_users_ttl: Duration::from_secs(config.all_users_ttl_secs),
            all_tasks_ttl: Duration::from_secs(config.all_tasks_ttl_secs),
            user_tasks_ttl: Duration::from_secs(config.user_tasks_ttl_secs),
            popularity_ttl: Duration::from_secs(config.popularity_ttl_secs),
            user_tasks_limit: config.user_tasks_limit,
            all_tasks_limit: config.all_tasks_limit,
        }
    }

    /// TTL for a single entity snapshot.
    #[must_use]
    pub const fn entity_ttl(&self, kind: EntityKind) -> Duration {
        match kind {
            EntityKind::User => self.user_ttl,
            EntityKind::Task => self.task_ttl,
        }
    }

    /// TTL for a materialized view.
    #[must_use]
    pub const fn view_ttl(&self, view: &View) -> Duration {
        match view {
            View::AllUsers => self.all_users_ttl,
            View::AllTasks => self.all_tasks_ttl,
            View::UserTasks(_) => self.user_tasks_ttl,
            View::ModulePopularity => self.popularity_ttl,
        }
    }

    /// Maximum rows kept in a view; `None` is unbounded.
    #[must_use]
    pub const fn view_limit(&self, view: &View) -> Option<usize> {
        match view {
            View::AllTasks => self.all_tasks_limit,
            View::UserTasks(_) => Some(self.user_tasks_limit),
            View::AllUsers | View::ModulePopularity => None,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
