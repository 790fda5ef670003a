//! Driving ports for pickup point registration and listing.

use async_trait::async_trait;

use crate::domain::{Error, PickupPoint, PickupPointFilter, PickupPointListing};

/// Driving port for registering pickup points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PickupPointCommand: Send + Sync {
    /// Register a pickup point in one of the supported cities.
    ///
    /// The raw city string is validated here so every caller shares the same
    /// allow-list and error.
    async fn create_pickup_point(&self, city: &str) -> Result<PickupPoint, Error>;
}

/// Driving port for the paginated listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PickupPointQuery: Send + Sync {
    /// Read one page of pickup points with their receptions and products.
    async fn list_pickup_points(
        &self,
        filter: PickupPointFilter,
    ) -> Result<Vec<PickupPointListing>, Error>;
}
