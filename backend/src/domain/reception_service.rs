//! Reception lifecycle service.
//!
//! Opens and closes receptions at a pickup point. The repository is the
//! arbiter of the one-open-reception rule; the pre-check here only avoids a
//! doomed insert in the common case.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    EntityKind, EntityMetrics, ReceptionCommand, ReceptionQuery, ReceptionRepository,
    ReceptionRepositoryError,
};
use crate::domain::service_support::{record_created, storage_failure, storage_unavailable};
use crate::domain::{Error, Reception};

pub(crate) const RECEPTION_ALREADY_OPEN: &str = "can't create one more reception";
pub(crate) const NO_OPEN_RECEPTION: &str = "no open reception";
pub(crate) const NO_OPEN_RECEPTION_TO_CLOSE: &str = "no open reception to close";

fn map_repository_error(error: ReceptionRepositoryError) -> Error {
    match error {
        ReceptionRepositoryError::Connection { message } => {
            storage_unavailable("reception", &message)
        }
        ReceptionRepositoryError::Query { message } => storage_failure("reception", &message),
        ReceptionRepositoryError::AlreadyOpen { .. } => {
            Error::reception_already_open(RECEPTION_ALREADY_OPEN)
        }
        ReceptionRepositoryError::PickupPointNotFound { pvz_id } => {
            Error::not_found(format!("pickup point {pvz_id} not found"))
        }
        ReceptionRepositoryError::NoOpenReception { .. } => {
            Error::no_open_reception(NO_OPEN_RECEPTION)
        }
    }
}

/// Reception service implementing the reception driving ports.
#[derive(Clone)]
pub struct ReceptionService<R> {
    reception_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn EntityMetrics>,
}

impl<R> ReceptionService<R> {
    /// Create a reception service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use backend::domain::ReceptionService;
    /// # use backend::domain::ports::NoOpEntityMetrics;
    /// # use backend::outbound::memory::MemoryStore;
    /// # use mockable::DefaultClock;
    /// let service = ReceptionService::new(
    ///     Arc::new(MemoryStore::default()),
    ///     Arc::new(DefaultClock),
    ///     Arc::new(NoOpEntityMetrics),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        reception_repo: Arc<R>,
        clock: Arc<dyn Clock>,
        metrics: Arc<dyn EntityMetrics>,
    ) -> Self {
        Self {
            reception_repo,
            clock,
            metrics,
        }
    }
}

impl<R> ReceptionService<R>
where
    R: ReceptionRepository,
{
    async fn open_reception(&self, pvz_id: Uuid) -> Result<Reception, Error> {
        self.reception_repo
            .find_open(pvz_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::no_open_reception(NO_OPEN_RECEPTION))
    }
}

#[async_trait]
impl<R> ReceptionCommand for ReceptionService<R>
where
    R: ReceptionRepository,
{
    async fn create_reception(&self, pvz_id: Uuid) -> Result<Reception, Error> {
        let already_open = self
            .reception_repo
            .has_open_reception(pvz_id)
            .await
            .map_err(map_repository_error)?;
        if already_open {
            return Err(Error::reception_already_open(RECEPTION_ALREADY_OPEN));
        }

        let reception = Reception::open(pvz_id, self.clock.utc());
        self.reception_repo
            .create_open(&reception)
            .await
            .map_err(map_repository_error)?;

        record_created(self.metrics.as_ref(), EntityKind::Reception).await;
        info!(%pvz_id, reception_id = %reception.id, "reception opened");
        Ok(reception)
    }

    async fn close_last_reception(&self, pvz_id: Uuid) -> Result<Reception, Error> {
        let reception = self
            .reception_repo
            .close_open(pvz_id)
            .await
            .map_err(|err| match err {
                ReceptionRepositoryError::NoOpenReception { .. } => {
                    Error::no_open_reception(NO_OPEN_RECEPTION_TO_CLOSE)
                }
                other => map_repository_error(other),
            })?;

        info!(%pvz_id, reception_id = %reception.id, "reception closed");
        Ok(reception)
    }
}

#[async_trait]
impl<R> ReceptionQuery for ReceptionService<R>
where
    R: ReceptionRepository,
{
    async fn open_reception_id(&self, pvz_id: Uuid) -> Result<Uuid, Error> {
        self.open_reception(pvz_id).await.map(|reception| reception.id)
    }

    async fn last_reception_id(&self, pvz_id: Uuid) -> Result<Uuid, Error> {
        self.open_reception(pvz_id).await.map(|reception| reception.id)
    }
}

#[cfg(test)]
#[path = "reception_service_tests.rs"]
mod tests;
