//! Port for reception lifecycle persistence.
//!
//! Adapters own the at-most-one-open-reception rule: `create_open` must be
//! the arbiter even when two callers pass the `has_open_reception` pre-check
//! at the same time.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Reception;

use super::define_port_error;

define_port_error! {
    /// Errors raised by reception repository adapters.
    pub enum ReceptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reception repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reception repository query failed: {message}",
        /// The pickup point already has a reception in progress.
        AlreadyOpen { pvz_id: Uuid } => "pickup point {pvz_id} already has an open reception",
        /// The referenced pickup point does not exist.
        PickupPointNotFound { pvz_id: Uuid } => "pickup point {pvz_id} not found",
        /// The pickup point has no reception in progress.
        NoOpenReception { pvz_id: Uuid } => "pickup point {pvz_id} has no open reception",
    }
}

/// Port for opening, closing and locating receptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceptionRepository: Send + Sync {
    /// Whether the pickup point currently has a reception in progress.
    async fn has_open_reception(&self, pvz_id: Uuid) -> Result<bool, ReceptionRepositoryError>;

    /// Insert an in-progress reception.
    async fn create_open(&self, reception: &Reception) -> Result<(), ReceptionRepositoryError>;

    /// Atomically move the open reception to `close` and return it.
    async fn close_open(&self, pvz_id: Uuid) -> Result<Reception, ReceptionRepositoryError>;

    /// Locate the open reception, if any.
    async fn find_open(&self, pvz_id: Uuid) -> Result<Option<Reception>, ReceptionRepositoryError>;
}
