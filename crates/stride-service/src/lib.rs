//! # Stride Service
//!
//! Service layer for Stride. Reads go through the cache accessors and fall
//! back to the primary store; writes go to the store first and then through
//! the [`MutationCoordinator`], which brings every affected cache entry back
//! in line with the store.

pub mod cache;
pub mod coordinator;
pub mod dto;
pub mod r#impl;
pub mod task_service;
pub mod user_service;

pub use cache::*;
pub use coordinator::{MutationCoordinator, SyncReport};
pub use dto::*;
pub use r#impl::{TaskServiceImpl, UserServiceImpl};
pub use task_service::*;
pub use user_service::*;
