//! Driving ports for the reception lifecycle.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Reception};

/// Driving port for reception writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceptionCommand: Send + Sync {
    /// Open a new reception at the pickup point.
    ///
    /// Fails with `ReceptionAlreadyOpen` when one is already in progress.
    async fn create_reception(&self, pvz_id: Uuid) -> Result<Reception, Error>;

    /// Close the pickup point's open reception and return it.
    ///
    /// Fails with `NoOpenReception` when nothing is in progress.
    async fn close_last_reception(&self, pvz_id: Uuid) -> Result<Reception, Error>;
}

/// Driving port for reception lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceptionQuery: Send + Sync {
    /// Identifier of the open reception.
    async fn open_reception_id(&self, pvz_id: Uuid) -> Result<Uuid, Error>;

    /// Identifier of the reception products are currently attached to.
    ///
    /// Only the open reception is ever "last" for mutation purposes, so this
    /// resolves exactly like [`ReceptionQuery::open_reception_id`].
    async fn last_reception_id(&self, pvz_id: Uuid) -> Result<Uuid, Error>;
}
