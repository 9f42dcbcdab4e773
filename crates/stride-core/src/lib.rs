//! # Stride Core
//!
//! Core types, domain entities, and error definitions for Stride.
//! Every other crate in the workspace builds on the abstractions here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
