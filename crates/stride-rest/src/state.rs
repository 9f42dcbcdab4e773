//! Application state for Axum handlers.

use std::sync::Arc;
use stride_service::{TaskService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub task_service: Arc<dyn TaskService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, task_service: Arc<dyn TaskService>) -> Self {
        Self {
            user_service,
            task_service,
        }
    }
}
