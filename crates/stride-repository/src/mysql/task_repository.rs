//! MySQL task repository implementation.

use crate::{traits::TaskRepository, with_timeout, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use stride_core::{ModulePopularity, StrideError, StrideResult, Task, TaskId, UserId};
use tracing::debug;

const TASK_COLUMNS: &str = "id, user_id, first_name, last_name, task_name, module_code, \
     duration, hidden, created_at, updated_at";

/// Newest first. Ids are time-ordered, so they settle equal timestamps.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// MySQL task repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = TaskRepository)]
pub struct MySqlTaskRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlTaskRepository {
    /// Creates a new MySQL task repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: &TaskId) -> Result<Option<Task>, sqlx::Error> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = ?",
            TASK_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Task::from))
    }
}

/// MySQL reads `LIMIT 18446744073709551615` as "all rows".
fn row_limit(limit: Option<usize>) -> u64 {
    limit.map_or(u64::MAX, |n| n as u64)
}

/// Database row representation of a task.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: String,
    user_id: String,
    first_name: String,
    last_name: String,
    task_name: String,
    module_code: String,
    duration: String,
    hidden: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::from(row.id),
            user_id: UserId::from(row.user_id),
            first_name: row.first_name,
            last_name: row.last_name,
            task_name: row.task_name,
            module_code: row.module_code,
            duration: row.duration,
            hidden: row.hidden,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ModuleCountRow {
    module_code: String,
    count: i64,
}

#[async_trait]
impl TaskRepository for MySqlTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> StrideResult<Option<Task>> {
        debug!("Finding task by id: {}", id);
        with_timeout(self.pool.query_timeout(), self.fetch_by_id(id)).await
    }

    async fn find_by_owner(&self, owner: &UserId, limit: Option<usize>) -> StrideResult<Vec<Task>> {
        debug!("Finding tasks for user {} (limit {:?})", owner, limit);

        let rows = with_timeout(
            self.pool.query_timeout(),
            sqlx::query_as::<_, TaskRow>(&format!(
                "SELECT {} FROM tasks WHERE user_id = ? {} LIMIT ?",
                TASK_COLUMNS, NEWEST_FIRST
            ))
            .bind(owner.as_str())
            .bind(row_limit(limit))
            .fetch_all(self.pool.inner()),
        )
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn find_recent(&self, limit: Option<usize>) -> StrideResult<Vec<Task>> {
        debug!("Finding recent tasks (limit {:?})", limit);

        let rows = with_timeout(
            self.pool.query_timeout(),
            sqlx::query_as::<_, TaskRow>(&format!(
                "SELECT {} FROM tasks {} LIMIT ?",
                TASK_COLUMNS, NEWEST_FIRST
            ))
            .bind(row_limit(limit))
            .fetch_all(self.pool.inner()),
        )
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, task: &Task) -> StrideResult<Task> {
        debug!("Inserting task {} for user {}", task.id, task.user_id);

        with_timeout(self.pool.query_timeout(), async {
            sqlx::query(
                r#"
                INSERT INTO tasks (id, user_id, first_name, last_name, task_name, module_code,
                                   duration, hidden, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(task.id.as_str())
            .bind(task.user_id.as_str())
            .bind(&task.first_name)
            .bind(&task.last_name)
            .bind(&task.task_name)
            .bind(&task.module_code)
            .bind(&task.duration)
            .bind(task.hidden)
            .bind(task.created_at)
            .bind(task.updated_at)
            .execute(self.pool.inner())
            .await?;

            self.fetch_by_id(&task.id)
                .await?
                .ok_or_else(|| StrideError::internal("Failed to fetch inserted task"))
        })
        .await
    }

    async fn set_hidden(&self, id: &TaskId, hidden: bool) -> StrideResult<Option<Task>> {
        debug!("Setting hidden={} on task {}", hidden, id);

        with_timeout(self.pool.query_timeout(), async {
            sqlx::query("UPDATE tasks SET hidden = ?, updated_at = ? WHERE id = ?")
                .bind(hidden)
                .bind(Utc::now())
                .bind(id.as_str())
                .execute(self.pool.inner())
                .await?;

            self.fetch_by_id(id).await
        })
        .await
    }

    async fn delete(&self, id: &TaskId) -> StrideResult<bool> {
        debug!("Deleting task: {}", id);

        let result = with_timeout(
            self.pool.query_timeout(),
            sqlx::query("DELETE FROM tasks WHERE id = ?")
                .bind(id.as_str())
                .execute(self.pool.inner()),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_module(&self) -> StrideResult<Vec<ModulePopularity>> {
        debug!("Aggregating task counts by module");

        let rows = with_timeout(
            self.pool.query_timeout(),
            sqlx::query_as::<_, ModuleCountRow>(
                r#"
                SELECT module_code, COUNT(*) AS count
                FROM tasks
                GROUP BY module_code
                ORDER BY count DESC, module_code ASC
                "#,
            )
            .fetch_all(self.pool.inner()),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ModulePopularity::new(row.module_code, u64::try_from(row.count).unwrap_or(0)))
            .collect())
    }
}
