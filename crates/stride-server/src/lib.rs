//! # Stride Server Library
//!
//! Dependency injection wiring, logging setup and the HTTP serve loop for
//! the Stride binary.

pub mod app;
pub mod di;
pub mod logging;
