//! REST API controllers.

pub mod cached_controller;
pub mod health_controller;
pub mod stats_controller;
pub mod task_controller;
pub mod user_controller;

use crate::responses::AppError;
use stride_core::{TaskId, UserId};

fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    UserId::parse(raw).map_err(AppError)
}

fn parse_task_id(raw: &str) -> Result<TaskId, AppError> {
    TaskId::parse(raw).map_err(AppError)
}
