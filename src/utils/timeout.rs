// ABOUTME: Deadline wrappers for store operations and recipe service calls
// ABOUTME: Converts an elapsed tokio timeout into a Timeout AppError naming the operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Run `operation`, failing with `Timeout` if it does not finish within `duration`
///
/// The wrapped future is dropped on expiry. For a cache write this drops the
/// transaction guard as well, which rolls the write back.
///
/// # Errors
///
/// Returns `Timeout` if the deadline passes, otherwise whatever `operation`
/// returns.
pub async fn with_timeout<F, T>(duration: Duration, operation: &str, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    (timeout(duration, future).await).map_or_else(
        |_| {
            warn!(
                operation,
                timeout_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "Operation exceeded its deadline"
            );
            Err(AppError::timeout(operation, duration.as_secs_f64()))
        },
        |result| result,
    )
}
