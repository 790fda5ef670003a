//! Internal helpers shared by the lifecycle services.

use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::ports::{EntityKind, EntityMetrics};

/// Record an entity creation; exporter failures never fail the request.
pub(crate) async fn record_created(metrics: &dyn EntityMetrics, kind: EntityKind) {
    if let Err(err) = metrics.record_created(kind).await {
        warn!(entity = %kind, error = %err, "failed to record entity metric");
    }
}

/// Storage connection failure: the dependency is down.
pub(crate) fn storage_unavailable(repository: &str, message: &str) -> Error {
    error!(repository, %message, "storage connection failed");
    Error::service_unavailable(format!("{repository} repository unavailable"))
}

/// Storage query failure: surfaced as an internal error.
pub(crate) fn storage_failure(repository: &str, message: &str) -> Error {
    error!(repository, %message, "storage query failed");
    Error::internal(format!("{repository} repository error"))
}
