//! PostgreSQL-backed `ProductRepository` implementation.
//!
//! Both operations lock the open reception row with `SELECT ... FOR UPDATE`
//! inside one transaction before touching products, so a concurrent close
//! waits for the product write to commit (or sees it fail).

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDraft, ReceptionStatus};

use super::diesel_error_mapping::{DieselFailure, classify, pool_error_message};
use super::models::ProductRow;
use super::pool::{DbPool, PoolError};
use super::schema::{products, receptions};

/// Diesel-backed implementation of the product repository port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures raised inside a product transaction.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    NoOpenReception,
    NoProducts { reception_id: Uuid },
}

impl From<diesel::result::Error> for TxError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    ProductRepositoryError::connection(pool_error_message(error))
}

fn map_tx_error(error: TxError, pvz_id: Uuid, operation: &str) -> ProductRepositoryError {
    match error {
        TxError::NoOpenReception => ProductRepositoryError::no_open_reception(pvz_id),
        TxError::NoProducts { reception_id } => ProductRepositoryError::no_products(reception_id),
        TxError::Diesel(err) => match classify(err, operation) {
            DieselFailure::Connection(message) => ProductRepositoryError::connection(message),
            DieselFailure::Query(message) => ProductRepositoryError::query(message),
            other => {
                ProductRepositoryError::query(format!("unexpected constraint failure: {other:?}"))
            }
        },
    }
}

/// Lock the pickup point's open reception and return its id.
async fn lock_open_reception(conn: &mut AsyncPgConnection, pvz_id: Uuid) -> Result<Uuid, TxError> {
    receptions::table
        .filter(receptions::pvz_id.eq(pvz_id))
        .filter(receptions::status.eq(ReceptionStatus::InProgress.as_str()))
        .select(receptions::id)
        .for_update()
        .first::<Uuid>(conn)
        .await
        .optional()?
        .ok_or(TxError::NoOpenReception)
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn add_to_open_reception(
        &self,
        pvz_id: Uuid,
        draft: ProductDraft,
    ) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let reception_id = lock_open_reception(conn, pvz_id).await?;
                let product = draft.into_product(reception_id);
                diesel::insert_into(products::table)
                    .values(ProductRow::from(&product))
                    .execute(conn)
                    .await?;
                Ok(product)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, pvz_id, "add product"))
    }

    async fn delete_most_recent(&self, pvz_id: Uuid) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let reception_id = lock_open_reception(conn, pvz_id).await?;
                    let latest = products::table
                        .filter(products::reception_id.eq(reception_id))
                        .order((products::date_time.desc(), products::seq.desc()))
                        .select(ProductRow::as_select())
                        .first::<ProductRow>(conn)
                        .await
                        .optional()?
                        .ok_or(TxError::NoProducts { reception_id })?;
                    diesel::delete(products::table.filter(products::id.eq(latest.id)))
                        .execute(conn)
                        .await?;
                    Ok(latest)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_tx_error(err, pvz_id, "delete latest product"))?;

        Product::try_from(row).map_err(ProductRepositoryError::query)
    }
}
