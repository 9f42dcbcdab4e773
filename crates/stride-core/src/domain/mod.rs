//! Domain entities for Stride.

mod popularity;
mod task;
mod user;

pub use popularity::*;
pub use task::*;
pub use user::*;
