//! Typed ID wrappers for domain entities.
//!
//! Identifiers are opaque strings. New ones are time-ordered (UUID v7 in
//! simple form), so lexical order follows creation order.

use crate::StrideError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Longest identifier accepted from callers.
const MAX_ID_LEN: usize = 64;

fn validate_id(kind: &str, s: &str) -> Result<(), StrideError> {
    if s.is_empty() {
        return Err(StrideError::validation(format!("{} id must not be empty", kind)));
    }
    if s.len() > MAX_ID_LEN || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(StrideError::validation(format!("Invalid {} id: {}", kind, s)));
    }
    Ok(())
}

/// A strongly-typed wrapper for user IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new time-ordered user ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Parses a user ID supplied by a caller.
    pub fn parse(s: &str) -> Result<Self, StrideError> {
        validate_id("user", s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A strongly-typed wrapper for task IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new time-ordered task ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Parses a task ID supplied by a caller.
    pub fn parse(s: &str) -> Result<Self, StrideError> {
        validate_id("task", s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
