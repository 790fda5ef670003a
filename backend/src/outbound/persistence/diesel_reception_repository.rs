//! PostgreSQL-backed `ReceptionRepository` implementation.
//!
//! The partial unique index `receptions_one_open_per_pvz` arbitrates
//! concurrent opens; closing is a single conditional `UPDATE ... RETURNING`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ReceptionRepository, ReceptionRepositoryError};
use crate::domain::{Reception, ReceptionStatus};

use super::diesel_error_mapping::{
    DieselFailure, ONE_OPEN_RECEPTION_CONSTRAINT, classify, pool_error_message,
};
use super::models::ReceptionRow;
use super::pool::{DbPool, PoolError};
use super::schema::receptions;

/// Diesel-backed implementation of the reception repository port.
#[derive(Clone)]
pub struct DieselReceptionRepository {
    pool: DbPool,
}

impl DieselReceptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReceptionRepositoryError {
    ReceptionRepositoryError::connection(pool_error_message(error))
}

fn map_failure(failure: DieselFailure) -> ReceptionRepositoryError {
    match failure {
        DieselFailure::Connection(message) => ReceptionRepositoryError::connection(message),
        DieselFailure::Query(message) => ReceptionRepositoryError::query(message),
        other => ReceptionRepositoryError::query(format!("unexpected constraint failure: {other:?}")),
    }
}

fn map_insert_failure(failure: DieselFailure, pvz_id: Uuid) -> ReceptionRepositoryError {
    if failure.is_unique_violation_of(ONE_OPEN_RECEPTION_CONSTRAINT) {
        return ReceptionRepositoryError::already_open(pvz_id);
    }
    match failure {
        DieselFailure::ForeignKeyViolation => ReceptionRepositoryError::pickup_point_not_found(pvz_id),
        other => map_failure(other),
    }
}

fn to_reception(row: ReceptionRow) -> Result<Reception, ReceptionRepositoryError> {
    Reception::try_from(row).map_err(ReceptionRepositoryError::query)
}

#[async_trait]
impl ReceptionRepository for DieselReceptionRepository {
    async fn has_open_reception(&self, pvz_id: Uuid) -> Result<bool, ReceptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            receptions::table
                .filter(receptions::pvz_id.eq(pvz_id))
                .filter(receptions::status.eq(ReceptionStatus::InProgress.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_failure(classify(err, "check open reception")))
    }

    async fn create_open(&self, reception: &Reception) -> Result<(), ReceptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(receptions::table)
            .values(ReceptionRow::from(reception))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_failure(classify(err, "insert reception"), reception.pvz_id))
    }

    async fn close_open(&self, pvz_id: Uuid) -> Result<Reception, ReceptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            receptions::table
                .filter(receptions::pvz_id.eq(pvz_id))
                .filter(receptions::status.eq(ReceptionStatus::InProgress.as_str())),
        )
        .set(receptions::status.eq(ReceptionStatus::Close.as_str()))
        .returning(ReceptionRow::as_returning())
        .get_result::<ReceptionRow>(&mut conn)
        .await
        .optional()
        .map_err(|err| map_failure(classify(err, "close open reception")))?;

        match row {
            Some(row) => to_reception(row),
            None => Err(ReceptionRepositoryError::no_open_reception(pvz_id)),
        }
    }

    async fn find_open(&self, pvz_id: Uuid) -> Result<Option<Reception>, ReceptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        receptions::table
            .filter(receptions::pvz_id.eq(pvz_id))
            .filter(receptions::status.eq(ReceptionStatus::InProgress.as_str()))
            .select(ReceptionRow::as_select())
            .first::<ReceptionRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify(err, "select open reception")))?
            .map(to_reception)
            .transpose()
    }
}
