//! Result type aliases for Stride.

use crate::StrideError;

/// A specialized `Result` type for Stride operations.
pub type StrideResult<T> = Result<T, StrideError>;
