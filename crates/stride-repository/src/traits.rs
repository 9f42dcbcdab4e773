//! Primary store adapter traits.

use async_trait::async_trait;
use stride_core::{Interface, ModulePopularity, StrideResult, Task, TaskId, User, UserId, UserUpdate};

/// User persistence.
///
/// `Ok(None)` means the record does not exist; store failures are `Err`.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: &UserId) -> StrideResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> StrideResult<Option<User>>;

    /// All users, points descending with ties broken by id ascending.
    async fn find_ranked(&self) -> StrideResult<Vec<User>>;

    /// Inserts a new user and returns the stored row.
    async fn insert(&self, user: &User) -> StrideResult<User>;

    /// Applies a field-level update and returns the updated row, or `None`
    /// if no user has this id.
    async fn apply(&self, id: &UserId, update: &UserUpdate) -> StrideResult<Option<User>>;

    /// Deletes a user by ID. Returns false if nothing was deleted.
    async fn delete(&self, id: &UserId) -> StrideResult<bool>;
}

/// Task persistence.
#[async_trait]
pub trait TaskRepository: Interface + Send + Sync {
    /// Finds a task by ID.
    async fn find_by_id(&self, id: &TaskId) -> StrideResult<Option<Task>>;

    /// One owner's tasks, newest first, at most `limit` rows.
    async fn find_by_owner(&self, owner: &UserId, limit: Option<usize>) -> StrideResult<Vec<Task>>;

    /// All tasks, newest first, at most `limit` rows.
    async fn find_recent(&self, limit: Option<usize>) -> StrideResult<Vec<Task>>;

    /// Inserts a new task and returns the stored row.
    async fn insert(&self, task: &Task) -> StrideResult<Task>;

    /// Sets the hidden flag and returns the updated row, or `None` if absent.
    async fn set_hidden(&self, id: &TaskId, hidden: bool) -> StrideResult<Option<Task>>;

    /// Deletes a task by ID. Returns false if nothing was deleted.
    async fn delete(&self, id: &TaskId) -> StrideResult<bool>;

    /// Task counts grouped by module code, count descending.
    async fn count_by_module(&self) -> StrideResult<Vec<ModulePopularity>>;
}
