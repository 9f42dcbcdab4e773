//! Task entity.

use crate::{Entity, Owned, TaskId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A study task logged by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: TaskId,

    /// Owning user.
    pub user_id: UserId,

    /// Owner's first name at creation time.
    pub first_name: String,

    /// Owner's last name at creation time.
    pub last_name: String,

    /// Task description.
    pub task_name: String,

    /// Module (category) code the task counts towards.
    pub module_code: String,

    /// Time spent, as entered by the user.
    pub duration: String,

    /// Whether the task is hidden from the activity feed.
    pub hidden: bool,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `owner`, copying the owner's names.
    #[must_use]
    pub fn new(owner: &User, task_name: String, module_code: String, duration: String) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            user_id: owner.id.clone(),
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            task_name,
            module_code,
            duration,
            hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the hidden flag.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.updated_at = Utc::now();
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> &TaskId {
        &self.id
    }
}

impl Owned for Task {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Orders tasks newest first. Ids are time-ordered and break timestamp ties.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
