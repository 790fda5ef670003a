//! Driving port for product mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Product, ProductType};

/// Driving port for adding and removing products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommand: Send + Sync {
    /// Record a product against the pickup point's open reception.
    async fn add_product(&self, pvz_id: Uuid, product_type: ProductType)
    -> Result<Product, Error>;

    /// Remove the most recently added product and return its identifier.
    async fn delete_last_product(&self, pvz_id: Uuid) -> Result<Uuid, Error>;
}
