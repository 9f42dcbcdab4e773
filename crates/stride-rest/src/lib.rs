//! # Stride REST
//!
//! Thin HTTP surface over the Stride services: uncached reads and mutations
//! under `/api/v1`, cached reads under `/api/v1/cached`, module statistics,
//! health checks and Swagger UI.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
