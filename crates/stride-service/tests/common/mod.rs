//! Shared fixtures for service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stride_core::{
    rank_modules, rank_users, sort_newest_first, ModulePopularity, StrideError, StrideResult,
    Task, TaskId, User, UserId, UserUpdate,
};
use stride_repository::{TaskRepository, UserRepository};
use stride_service::{
    CacheInterface, CachePolicy, MemoryCacheService, SignUpRequest, TaskServiceImpl,
    UserServiceImpl,
};

/// Counts calls per operation name.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<HashMap<&'static str, usize>>,
    total: AtomicUsize,
}

impl CallLog {
    fn record(&self, op: &'static str) {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
        self.total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    pub log: CallLog,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> StrideResult<Option<User>> {
        self.log.record("find_by_id");
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StrideResult<Option<User>> {
        self.log.record("find_by_email");
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_ranked(&self) -> StrideResult<Vec<User>> {
        self.log.record("find_ranked");
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        rank_users(&mut users);
        Ok(users)
    }

    async fn insert(&self, user: &User) -> StrideResult<User> {
        self.log.record("insert");
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(StrideError::conflict("Duplicate email"));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn apply(&self, id: &UserId, update: &UserUpdate) -> StrideResult<Option<User>> {
        self.log.record("apply");
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(id).map(|user| {
            user.apply(update);
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> StrideResult<bool> {
        self.log.record("delete");
        Ok(self.users.lock().unwrap().remove(id).is_some())
    }
}

/// In-memory task store.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<HashMap<TaskId, Task>>,
    pub log: CallLog,
}

impl InMemoryTaskRepository {
    fn sorted(&self, owner: Option<&UserId>, limit: Option<usize>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .values()
            .filter(|t| owner.map_or(true, |o| &t.user_id == o))
            .cloned()
            .collect();
        sort_newest_first(&mut tasks);
        if let Some(limit) = limit {
            tasks.truncate(limit);
        }
        tasks
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> StrideResult<Option<Task>> {
        self.log.record("find_by_id");
        Ok(self.tasks.lock().unwrap().get(id).cloned())
    }

    async fn find_by_owner(&self, owner: &UserId, limit: Option<usize>) -> StrideResult<Vec<Task>> {
        self.log.record("find_by_owner");
        Ok(self.sorted(Some(owner), limit))
    }

    async fn find_recent(&self, limit: Option<usize>) -> StrideResult<Vec<Task>> {
        self.log.record("find_recent");
        Ok(self.sorted(None, limit))
    }

    async fn insert(&self, task: &Task) -> StrideResult<Task> {
        self.log.record("insert");
        self.tasks
            .lock()
            .unwrap()
            .insert(task.id.clone(), task.clone());
        Ok(task.clone())
    }

    async fn set_hidden(&self, id: &TaskId, hidden: bool) -> StrideResult<Option<Task>> {
        self.log.record("set_hidden");
        let mut tasks = self.tasks.lock().unwrap();
        Ok(tasks.get_mut(id).map(|task| {
            task.set_hidden(hidden);
            task.clone()
        }))
    }

    async fn delete(&self, id: &TaskId) -> StrideResult<bool> {
        self.log.record("delete");
        Ok(self.tasks.lock().unwrap().remove(id).is_some())
    }

    async fn count_by_module(&self) -> StrideResult<Vec<ModulePopularity>> {
        self.log.record("count_by_module");
        let mut counts: HashMap<String, u64> = HashMap::new();
        for task in self.tasks.lock().unwrap().values() {
            *counts.entry(task.module_code.clone()).or_default() += 1;
        }
        let mut rows: Vec<ModulePopularity> = counts
            .into_iter()
            .map(|(code, count)| ModulePopularity::new(code, count))
            .collect();
        rank_modules(&mut rows);
        Ok(rows)
    }
}

/// Cache whose every operation fails, as an unreachable Redis would.
#[derive(Debug, Default)]
pub struct FailingCache;

#[async_trait]
impl CacheInterface for FailingCache {
    async fn get_raw(&self, _key: &str) -> StrideResult<Option<String>> {
        Err(StrideError::cache("connection refused"))
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> StrideResult<()> {
        Err(StrideError::cache("connection refused"))
    }

    async fn delete(&self, _key: &str) -> StrideResult<bool> {
        Err(StrideError::cache("connection refused"))
    }

    async fn exists(&self, _key: &str) -> StrideResult<bool> {
        Err(StrideError::cache("connection refused"))
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Services wired over in-memory stores.
pub struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub cache: Arc<dyn CacheInterface>,
    pub user_service: UserServiceImpl,
    pub task_service: TaskServiceImpl,
}

impl Harness {
    pub fn with_cache(cache: Arc<dyn CacheInterface>) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let tasks = Arc::new(InMemoryTaskRepository::default());
        let policy = CachePolicy::default();
        let user_service = UserServiceImpl::new(users.clone(), cache.clone(), policy.clone());
        let task_service = TaskServiceImpl::new(tasks.clone(), users.clone(), cache.clone(), policy);
        Self {
            users,
            tasks,
            cache,
            user_service,
            task_service,
        }
    }

    pub fn memory() -> Self {
        Self::with_cache(Arc::new(MemoryCacheService::new(1024).unwrap()))
    }

    pub fn failing() -> Self {
        Self::with_cache(Arc::new(FailingCache))
    }
}

pub fn sign_up_request(first: &str) -> SignUpRequest {
    SignUpRequest {
        first_name: first.to_string(),
        last_name: "Tan".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        password_hash: "hash".to_string(),
        token: None,
        refresh_token: None,
    }
}
