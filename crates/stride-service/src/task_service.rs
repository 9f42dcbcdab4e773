//! Task service trait definition.

use crate::dto::{AddTaskRequest, ModulePopularityResponse, SetHiddenRequest, TaskResponse};
use async_trait::async_trait;
use stride_core::{Interface, StrideResult, TaskId, UserId};

/// Task service trait.
#[async_trait]
pub trait TaskService: Interface + Send + Sync {
    /// Logs a task for an existing user.
    async fn add_task(&self, request: AddTaskRequest) -> StrideResult<TaskResponse>;

    /// Gets a task by ID (cached).
    async fn get_task(&self, id: &TaskId) -> StrideResult<TaskResponse>;

    /// Activity feed, newest first (cached).
    async fn list_tasks(&self) -> StrideResult<Vec<TaskResponse>>;

    /// Activity feed straight from the primary store.
    async fn list_tasks_uncached(&self) -> StrideResult<Vec<TaskResponse>>;

    /// A user's most recent tasks, newest first (cached).
    async fn list_user_tasks(&self, owner: &UserId) -> StrideResult<Vec<TaskResponse>>;

    /// Hides or unhides a task.
    async fn set_hidden(&self, id: &TaskId, request: SetHiddenRequest) -> StrideResult<TaskResponse>;

    /// Deletes a task.
    async fn delete_task(&self, id: &TaskId) -> StrideResult<()>;

    /// Task counts per module code, most popular first (cached).
    async fn most_popular_modules(&self) -> StrideResult<Vec<ModulePopularityResponse>>;
}
