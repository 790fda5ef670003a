//! Product ledger service.
//!
//! Products only ever attach to, or detach from, the pickup point's open
//! reception. Removal is strictly last-in first-out by `date_time`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    EntityKind, EntityMetrics, ProductCommand, ProductRepository, ProductRepositoryError,
};
use crate::domain::reception_service::NO_OPEN_RECEPTION;
use crate::domain::service_support::{record_created, storage_failure, storage_unavailable};
use crate::domain::{Error, Product, ProductDraft, ProductType};

pub(crate) const NO_OPEN_RECEPTION_FOR_DELETE: &str = "no open reception for deleting product";
pub(crate) const NOTHING_TO_DELETE: &str = "nothing to delete";

fn map_repository_error(error: ProductRepositoryError, no_open_message: &str) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => storage_unavailable("product", &message),
        ProductRepositoryError::Query { message } => storage_failure("product", &message),
        ProductRepositoryError::NoOpenReception { .. } => Error::no_open_reception(no_open_message),
        ProductRepositoryError::NoProducts { .. } => Error::no_products(NOTHING_TO_DELETE),
    }
}

/// Product service implementing [`ProductCommand`].
#[derive(Clone)]
pub struct ProductService<R> {
    product_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn EntityMetrics>,
}

impl<R> ProductService<R> {
    /// Create a product service.
    pub fn new(
        product_repo: Arc<R>,
        clock: Arc<dyn Clock>,
        metrics: Arc<dyn EntityMetrics>,
    ) -> Self {
        Self {
            product_repo,
            clock,
            metrics,
        }
    }
}

#[async_trait]
impl<R> ProductCommand for ProductService<R>
where
    R: ProductRepository,
{
    async fn add_product(&self, pvz_id: Uuid, product_type: ProductType) -> Result<Product, Error> {
        let draft = ProductDraft {
            id: Uuid::new_v4(),
            date_time: self.clock.utc(),
            product_type,
        };
        let product = self
            .product_repo
            .add_to_open_reception(pvz_id, draft)
            .await
            .map_err(|err| map_repository_error(err, NO_OPEN_RECEPTION))?;

        record_created(self.metrics.as_ref(), EntityKind::Product).await;
        info!(
            %pvz_id,
            reception_id = %product.reception_id,
            product_id = %product.id,
            "product added"
        );
        Ok(product)
    }

    async fn delete_last_product(&self, pvz_id: Uuid) -> Result<Uuid, Error> {
        let removed = self
            .product_repo
            .delete_most_recent(pvz_id)
            .await
            .map_err(|err| map_repository_error(err, NO_OPEN_RECEPTION_FOR_DELETE))?;

        info!(%pvz_id, product_id = %removed.id, "product deleted");
        Ok(removed.id)
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
