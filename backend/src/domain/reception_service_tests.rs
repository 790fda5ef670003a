//! Tests for the reception lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::MockClock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockEntityMetrics, MockReceptionRepository, NoOpEntityMetrics};
use crate::domain::{ErrorCode, ReceptionStatus};

fn opened_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
        .expect("RFC3339 fixture timestamp")
        .with_timezone(&Utc)
}

#[fixture]
fn clock() -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(opened_at());
    Arc::new(clock)
}

fn service(
    repo: MockReceptionRepository,
    clock: Arc<MockClock>,
) -> ReceptionService<MockReceptionRepository> {
    ReceptionService::new(Arc::new(repo), clock, Arc::new(NoOpEntityMetrics))
}

#[rstest]
#[tokio::test]
async fn create_reception_opens_in_progress_at_clock_time(clock: Arc<MockClock>) {
    let pvz_id = Uuid::new_v4();
    let mut repo = MockReceptionRepository::new();
    repo.expect_has_open_reception()
        .with(eq(pvz_id))
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_create_open()
        .withf(move |reception| {
            reception.pvz_id == pvz_id && reception.status == ReceptionStatus::InProgress
        })
        .times(1)
        .return_once(|_| Ok(()));

    let reception = service(repo, clock)
        .create_reception(pvz_id)
        .await
        .expect("reception opens");

    assert_eq!(reception.pvz_id, pvz_id);
    assert_eq!(reception.status, ReceptionStatus::InProgress);
    assert_eq!(reception.date_time, opened_at());
}

#[rstest]
#[tokio::test]
async fn create_reception_rejects_second_open_without_writing(clock: Arc<MockClock>) {
    let mut repo = MockReceptionRepository::new();
    repo.expect_has_open_reception()
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_create_open().times(0);

    let error = service(repo, clock)
        .create_reception(Uuid::new_v4())
        .await
        .expect_err("already open");

    assert_eq!(error.code(), ErrorCode::ReceptionAlreadyOpen);
    assert_eq!(error.message(), "can't create one more reception");
}

#[rstest]
#[tokio::test]
async fn create_reception_maps_lost_race_to_already_open(clock: Arc<MockClock>) {
    let pvz_id = Uuid::new_v4();
    let mut repo = MockReceptionRepository::new();
    repo.expect_has_open_reception()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_create_open()
        .times(1)
        .return_once(move |_| Err(ReceptionRepositoryError::already_open(pvz_id)));

    let error = service(repo, clock)
        .create_reception(pvz_id)
        .await
        .expect_err("lost race");

    assert_eq!(error.code(), ErrorCode::ReceptionAlreadyOpen);
}

#[rstest]
#[tokio::test]
async fn create_reception_for_unknown_pickup_point_is_not_found(clock: Arc<MockClock>) {
    let pvz_id = Uuid::new_v4();
    let mut repo = MockReceptionRepository::new();
    repo.expect_has_open_reception()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_create_open()
        .times(1)
        .return_once(move |_| Err(ReceptionRepositoryError::pickup_point_not_found(pvz_id)));

    let error = service(repo, clock)
        .create_reception(pvz_id)
        .await
        .expect_err("missing pickup point");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_reception_records_metric(clock: Arc<MockClock>) {
    let mut repo = MockReceptionRepository::new();
    repo.expect_has_open_reception().return_once(|_| Ok(false));
    repo.expect_create_open().return_once(|_| Ok(()));
    let mut metrics = MockEntityMetrics::new();
    metrics
        .expect_record_created()
        .with(eq(EntityKind::Reception))
        .times(1)
        .return_once(|_| Ok(()));

    let service = ReceptionService::new(Arc::new(repo), clock, Arc::new(metrics));
    service
        .create_reception(Uuid::new_v4())
        .await
        .expect("reception opens");
}

#[rstest]
#[case(ReceptionRepositoryError::connection("pool timed out"), ErrorCode::ServiceUnavailable)]
#[case(ReceptionRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_reception_maps_storage_failures(
    clock: Arc<MockClock>,
    #[case] failure: ReceptionRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockReceptionRepository::new();
    repo.expect_has_open_reception()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = service(repo, clock)
        .create_reception(Uuid::new_v4())
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn close_last_reception_returns_closed_row(clock: Arc<MockClock>) {
    let pvz_id = Uuid::new_v4();
    let closed = Reception {
        id: Uuid::new_v4(),
        date_time: opened_at(),
        pvz_id,
        status: ReceptionStatus::Close,
    };
    let expected = closed.clone();
    let mut repo = MockReceptionRepository::new();
    repo.expect_close_open()
        .with(eq(pvz_id))
        .times(1)
        .return_once(move |_| Ok(closed));

    let reception = service(repo, clock)
        .close_last_reception(pvz_id)
        .await
        .expect("reception closes");

    assert_eq!(reception, expected);
}

#[rstest]
#[tokio::test]
async fn close_last_reception_without_open_one_fails(clock: Arc<MockClock>) {
    let pvz_id = Uuid::new_v4();
    let mut repo = MockReceptionRepository::new();
    repo.expect_close_open()
        .times(1)
        .return_once(move |_| Err(ReceptionRepositoryError::no_open_reception(pvz_id)));

    let error = service(repo, clock)
        .close_last_reception(pvz_id)
        .await
        .expect_err("nothing to close");

    assert_eq!(error.code(), ErrorCode::NoOpenReception);
    assert_eq!(error.message(), "no open reception to close");
}

#[rstest]
#[tokio::test]
async fn open_reception_id_resolves_open_row(clock: Arc<MockClock>) {
    let pvz_id = Uuid::new_v4();
    let open = Reception::open(pvz_id, opened_at());
    let expected = open.id;
    let mut repo = MockReceptionRepository::new();
    repo.expect_find_open()
        .with(eq(pvz_id))
        .times(2)
        .returning(move |_| Ok(Some(open.clone())));

    let service = service(repo, clock);
    assert_eq!(service.open_reception_id(pvz_id).await.ok(), Some(expected));
    assert_eq!(service.last_reception_id(pvz_id).await.ok(), Some(expected));
}

#[rstest]
#[tokio::test]
async fn open_reception_id_without_open_one_fails(clock: Arc<MockClock>) {
    let mut repo = MockReceptionRepository::new();
    repo.expect_find_open().times(1).return_once(|_| Ok(None));

    let error = service(repo, clock)
        .open_reception_id(Uuid::new_v4())
        .await
        .expect_err("no open reception");

    assert_eq!(error.code(), ErrorCode::NoOpenReception);
    assert_eq!(error.message(), "no open reception");
}
