//! Deadline for primary store operations.

use std::future::Future;
use std::time::Duration;
use stride_core::{StrideError, StrideResult};

/// Runs a store operation with a deadline.
///
/// The operation's own error converts into [`StrideError`]; running past
/// `duration` yields [`StrideError::Timeout`] and drops the future.
pub async fn with_timeout<T, E, Fut>(duration: Duration, fut: Fut) -> StrideResult<T>
where
    Fut: Future<Output = Result<T, E>>,
    StrideError: From<E>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result.map_err(StrideError::from),
        Err(_) => Err(StrideError::Timeout(format!(
            "Store operation timed out after {:?}",
            duration
        ))),
    }
}
