//! # Stride Repository
//!
//! Primary store adapter. Services depend on the [`UserRepository`] and
//! [`TaskRepository`] traits; the MySQL implementations bound every query by
//! the configured query timeout.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn TaskRepository>
//! MySqlUserRepository / MySqlTaskRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod timeout;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use timeout::with_timeout;
pub use traits::*;
