//! Data Transfer Objects (DTOs).

mod stats_dto;
mod task_dto;
mod user_dto;

pub use stats_dto::*;
pub use task_dto::*;
pub use user_dto::*;
