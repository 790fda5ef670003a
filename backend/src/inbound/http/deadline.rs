//! Per-request deadline around use-case calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::{ApiResult, Error};

/// Run `call`, failing with [`Error::timeout`] once `limit` elapses.
///
/// Expiry drops the in-flight future. Diesel transactions roll back when
/// their connection future is dropped, and the in-memory store never holds a
/// partial write across an await point.
pub(crate) async fn within<T, F>(limit: Duration, call: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = limit.as_millis(), "request deadline exceeded");
            Err(Error::timeout("request timed out"))
        }
    }
}
