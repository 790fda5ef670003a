//! Port for pickup point persistence and the paginated listing read.
use async_trait::async_trait;

use crate::domain::{PickupPoint, PickupPointFilter, PickupPointListing};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pickup point repository adapters.
    pub enum PickupPointRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pickup point repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pickup point repository query failed: {message}",
    }
}

/// Port for registering and listing pickup points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PickupPointRepository: Send + Sync {
    /// Persist a newly registered pickup point.
    async fn create(&self, pvz: &PickupPoint) -> Result<(), PickupPointRepositoryError>;

    /// Read one page of pickup points, newest registration first.
    ///
    /// Each pickup point carries the receptions whose `date_time` falls in
    /// the filter window, newest first, and every product of those receptions,
    /// newest first. Pickup points with no matching reception are still
    /// returned.
    async fn list(
        &self,
        filter: &PickupPointFilter,
    ) -> Result<Vec<PickupPointListing>, PickupPointRepositoryError>;
}
