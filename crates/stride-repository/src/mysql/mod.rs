//! MySQL repository implementations.

mod task_repository;
mod user_repository;

pub use task_repository::*;
pub use user_repository::*;
