//! Task-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stride_core::rules::{not_blank, valid_user_id};
use stride_core::{Task, TaskId, UserId};
use utoipa::ToSchema;
use validator::Validate;

/// Request to log a task for a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddTaskRequest {
    #[validate(custom(function = "valid_user_id"))]
    pub user_id: UserId,

    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub task_name: String,

    #[validate(length(max = 32), custom(function = "not_blank"))]
    pub module_code: String,

    #[validate(custom(function = "not_blank"))]
    pub duration: String,
}

/// Request to hide or unhide a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SetHiddenRequest {
    pub hidden: bool,
}

/// Task response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: TaskId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub task_name: String,
    pub module_code: String,
    pub duration: String,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            first_name: task.first_name,
            last_name: task.last_name,
            task_name: task.task_name,
            module_code: task.module_code,
            duration: task.duration,
            hidden: task.hidden,
            created_at: task.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::ValidateExt;

    #[test]
    fn test_add_task_rejects_blank_module() {
        let request = AddTaskRequest {
            user_id: UserId::new(),
            task_name: "Lab 4".to_string(),
            module_code: " ".to_string(),
            duration: "60".to_string(),
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_add_task_rejects_malformed_owner_id() {
        let request: AddTaskRequest = serde_json::from_value(serde_json::json!({
            "user_id": "u1:*",
            "task_name": "Lab 4",
            "module_code": "CS2100",
            "duration": "60",
        }))
        .unwrap();

        let err = request.validate_request().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: user_id: invalid_id");
    }

    #[test]
    fn test_add_task_accepts_normal_input() {
        let request = AddTaskRequest {
            user_id: UserId::new(),
            task_name: "Lab 4".to_string(),
            module_code: "CS2100".to_string(),
            duration: "60".to_string(),
        };
        assert!(request.validate_request().is_ok());
    }
}
