//! Service implementations.
//!
//! Trait definitions live in the parent module (`user_service.rs`,
//! `task_service.rs`).

pub mod task_service_impl;
pub mod user_service_impl;

pub use task_service_impl::TaskServiceImpl;
pub use user_service_impl::UserServiceImpl;
