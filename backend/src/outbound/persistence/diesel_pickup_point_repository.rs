//! PostgreSQL-backed `PickupPointRepository` implementation.
//!
//! The listing runs three ordered reads (one page of pickup points, their
//! receptions inside the window, and those receptions' products) and groups
//! them in memory.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PickupPointRepository, PickupPointRepositoryError};
use crate::domain::{PickupPoint, PickupPointFilter, PickupPointListing, Product, Reception};

use super::diesel_error_mapping::{DieselFailure, classify, pool_error_message};
use super::models::{PickupPointRow, ProductRow, ReceptionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{products, pvz, receptions};

/// Diesel-backed implementation of the pickup point repository port.
#[derive(Clone)]
pub struct DieselPickupPointRepository {
    pool: DbPool,
}

impl DieselPickupPointRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PickupPointRepositoryError {
    PickupPointRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PickupPointRepositoryError {
    match classify(error, operation) {
        DieselFailure::Connection(message) => PickupPointRepositoryError::connection(message),
        DieselFailure::Query(message) => PickupPointRepositoryError::query(message),
        other => PickupPointRepositoryError::query(format!("{operation}: {other:?}")),
    }
}

fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, PickupPointRepositoryError>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PickupPointRepositoryError::query)
}

#[async_trait]
impl PickupPointRepository for DieselPickupPointRepository {
    async fn create(&self, pickup_point: &PickupPoint) -> Result<(), PickupPointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(pvz::table)
            .values(PickupPointRow::from(pickup_point))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert pickup point"))
    }

    async fn list(
        &self,
        filter: &PickupPointFilter,
    ) -> Result<Vec<PickupPointListing>, PickupPointRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let page = filter.page();
        let offset = i64::try_from(page.offset())
            .map_err(|_| PickupPointRepositoryError::query("page offset out of range"))?;

        let pvz_rows: Vec<PickupPointRow> = pvz::table
            .order((pvz::registration_date.desc(), pvz::id.desc()))
            .limit(i64::from(page.limit()))
            .offset(offset)
            .select(PickupPointRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "select pickup point page"))?;
        if pvz_rows.is_empty() {
            return Ok(Vec::new());
        }
        let pvz_ids: Vec<Uuid> = pvz_rows.iter().map(|row| row.id).collect();

        let mut reception_query = receptions::table
            .filter(receptions::pvz_id.eq_any(pvz_ids))
            .select(ReceptionRow::as_select())
            .into_boxed::<Pg>();
        if let Some(start) = filter.start() {
            reception_query = reception_query.filter(receptions::date_time.ge(start));
        }
        if let Some(end) = filter.end() {
            reception_query = reception_query.filter(receptions::date_time.le(end));
        }
        let reception_rows: Vec<ReceptionRow> = reception_query
            .order((receptions::date_time.desc(), receptions::id.desc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "select receptions for page"))?;
        let reception_ids: Vec<Uuid> = reception_rows.iter().map(|row| row.id).collect();

        let product_rows: Vec<ProductRow> = if reception_ids.is_empty() {
            Vec::new()
        } else {
            products::table
                .filter(products::reception_id.eq_any(reception_ids))
                .order((products::date_time.desc(), products::seq.desc()))
                .select(ProductRow::as_select())
                .load(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "select products for page"))?
        };

        Ok(PickupPointListing::assemble(
            convert_rows::<_, PickupPoint>(pvz_rows)?,
            convert_rows::<_, Reception>(reception_rows)?,
            convert_rows::<_, Product>(product_rows)?,
        ))
    }
}
