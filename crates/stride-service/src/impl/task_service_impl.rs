//! Task service implementation.

use crate::cache::{CacheInterface, CachePolicy, EntityCache, EntityKind, ListCache, View};
use crate::coordinator::MutationCoordinator;
use crate::dto::{AddTaskRequest, ModulePopularityResponse, SetHiddenRequest, TaskResponse};
use crate::task_service::TaskService;
use async_trait::async_trait;
use std::sync::Arc;
use stride_core::{
    ModulePopularity, StrideError, StrideResult, Task, TaskId, User, UserId, ValidateExt,
};
use stride_repository::{TaskRepository, UserRepository};
use tracing::{debug, info};

/// Cache-aside task service.
///
/// Needs the user store as well: a new task copies its owner's names, and
/// the owner is read through the user snapshot cache.
pub struct TaskServiceImpl {
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserRepository>,
    entities: EntityCache,
    lists: ListCache,
    coordinator: MutationCoordinator,
}

impl TaskServiceImpl {
    /// Creates a new task service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            tasks,
            users,
            entities: EntityCache::new(cache.clone(), policy.clone()),
            lists: ListCache::new(cache.clone(), policy.clone()),
            coordinator: MutationCoordinator::new(cache, policy),
        }
    }

    fn responses(tasks: Vec<Task>) -> Vec<TaskResponse> {
        tasks.into_iter().map(TaskResponse::from).collect()
    }
}

impl std::fmt::Debug for TaskServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskServiceImpl").finish_non_exhaustive()
    }
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    async fn add_task(&self, request: AddTaskRequest) -> StrideResult<TaskResponse> {
        debug!("Adding task for user: {}", request.user_id);

        request.validate_request()?;

        let owner: User = self
            .entities
            .get(EntityKind::User, request.user_id.as_str(), || {
                self.users.find_by_id(&request.user_id)
            })
            .await?
            .ok_or_else(|| StrideError::not_found("User", &request.user_id))?;

        let task = Task::new(&owner, request.task_name, request.module_code, request.duration);
        let saved = self.tasks.insert(&task).await?;
        self.coordinator.task_created(&saved).await;

        info!("Task {} added for user {}", saved.id, saved.user_id);
        Ok(TaskResponse::from(saved))
    }

    async fn get_task(&self, id: &TaskId) -> StrideResult<TaskResponse> {
        debug!("Getting task: {}", id);

        let task: Task = self
            .entities
            .get(EntityKind::Task, id.as_str(), || self.tasks.find_by_id(id))
            .await?
            .ok_or_else(|| StrideError::not_found("Task", id))?;

        Ok(TaskResponse::from(task))
    }

    async fn list_tasks(&self) -> StrideResult<Vec<TaskResponse>> {
        debug!("Listing tasks");

        let tasks = self
            .lists
            .get_list(&View::AllTasks, |limit| self.tasks.find_recent(limit))
            .await?;

        Ok(Self::responses(tasks))
    }

    async fn list_tasks_uncached(&self) -> StrideResult<Vec<TaskResponse>> {
        debug!("Listing tasks from store");

        let tasks = self.tasks.find_recent(None).await?;
        Ok(Self::responses(tasks))
    }

    async fn list_user_tasks(&self, owner: &UserId) -> StrideResult<Vec<TaskResponse>> {
        debug!("Listing tasks for user: {}", owner);

        let tasks = self
            .lists
            .get_list(&View::UserTasks(owner.clone()), |limit| {
                self.tasks.find_by_owner(owner, limit)
            })
            .await?;

        Ok(Self::responses(tasks))
    }

    async fn set_hidden(&self, id: &TaskId, request: SetHiddenRequest) -> StrideResult<TaskResponse> {
        debug!("Setting hidden={} on task: {}", request.hidden, id);

        let task = self
            .tasks
            .set_hidden(id, request.hidden)
            .await?
            .ok_or_else(|| StrideError::not_found("Task", id))?;

        self.coordinator.task_updated(&task).await;

        info!("Task {} hidden={}", id, task.hidden);
        Ok(TaskResponse::from(task))
    }

    async fn delete_task(&self, id: &TaskId) -> StrideResult<()> {
        debug!("Deleting task: {}", id);

        if !self.tasks.delete(id).await? {
            return Err(StrideError::not_found("Task", id));
        }

        self.coordinator.task_deleted(id).await;

        info!("Task deleted: {}", id);
        Ok(())
    }

    async fn most_popular_modules(&self) -> StrideResult<Vec<ModulePopularityResponse>> {
        debug!("Getting module popularity");

        let rows: Vec<ModulePopularity> = self
            .lists
            .get_list(&View::ModulePopularity, |_| self.tasks.count_by_module())
            .await?;

        Ok(rows.into_iter().map(ModulePopularityResponse::from).collect())
    }
}
