//! Pickup point registry service: city-checked registration and listing.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    EntityKind, EntityMetrics, PickupPointCommand, PickupPointQuery, PickupPointRepository,
    PickupPointRepositoryError,
};
use crate::domain::service_support::{record_created, storage_failure, storage_unavailable};
use crate::domain::{City, Error, PickupPoint, PickupPointFilter, PickupPointListing};

fn map_repository_error(error: PickupPointRepositoryError) -> Error {
    match error {
        PickupPointRepositoryError::Connection { message } => {
            storage_unavailable("pickup point", &message)
        }
        PickupPointRepositoryError::Query { message } => storage_failure("pickup point", &message),
    }
}

/// Pickup point service implementing the registry driving ports.
#[derive(Clone)]
pub struct PickupPointService<R> {
    pvz_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn EntityMetrics>,
}

impl<R> PickupPointService<R> {
    /// Create a pickup point service.
    pub fn new(pvz_repo: Arc<R>, clock: Arc<dyn Clock>, metrics: Arc<dyn EntityMetrics>) -> Self {
        Self {
            pvz_repo,
            clock,
            metrics,
        }
    }
}

#[async_trait]
impl<R> PickupPointCommand for PickupPointService<R>
where
    R: PickupPointRepository,
{
    async fn create_pickup_point(&self, city: &str) -> Result<PickupPoint, Error> {
        let city: City = city
            .parse()
            .map_err(|_| Error::unsupported_city("unsupported city"))?;

        let pvz = PickupPoint {
            id: Uuid::new_v4(),
            city,
            registration_date: self.clock.utc(),
        };
        self.pvz_repo
            .create(&pvz)
            .await
            .map_err(map_repository_error)?;

        record_created(self.metrics.as_ref(), EntityKind::PickupPoint).await;
        info!(pvz_id = %pvz.id, city = %pvz.city, "pickup point registered");
        Ok(pvz)
    }
}

#[async_trait]
impl<R> PickupPointQuery for PickupPointService<R>
where
    R: PickupPointRepository,
{
    async fn list_pickup_points(
        &self,
        filter: PickupPointFilter,
    ) -> Result<Vec<PickupPointListing>, Error> {
        self.pvz_repo
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "pickup_point_service_tests.rs"]
mod tests;
