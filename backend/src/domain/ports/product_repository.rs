//! Port for product persistence scoped to the open reception.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Product, ProductDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
        /// The pickup point has no reception in progress.
        NoOpenReception { pvz_id: Uuid } => "pickup point {pvz_id} has no open reception",
        /// The open reception holds no products.
        NoProducts { reception_id: Uuid } => "reception {reception_id} has no products",
    }
}

/// Port for mutating the product set of a pickup point's open reception.
///
/// Both operations resolve the open reception and mutate in one atomic unit,
/// so a concurrent close either happens entirely before or entirely after.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Attach the draft to the open reception and persist it.
    async fn add_to_open_reception(
        &self,
        pvz_id: Uuid,
        draft: ProductDraft,
    ) -> Result<Product, ProductRepositoryError>;

    /// Remove the most recently recorded product of the open reception.
    async fn delete_most_recent(&self, pvz_id: Uuid) -> Result<Product, ProductRepositoryError>;
}
