//! gRPC inbound adapter exposing the read-only pickup point listing.
//!
//! The endpoint is unauthenticated and always returns the first page of up
//! to [`GRPC_PAGE_LIMIT`] pickup points, without reception data.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use tonic::{Request, Response, Status};
use tracing::{error, info};

use crate::domain::ports::PickupPointQuery;
use crate::domain::{Error, ErrorCode, PickupPointFilter, PickupPointListing};

/// Generated protobuf types and service stubs.
pub mod proto {
    #![allow(clippy::all, clippy::pedantic, missing_docs)]
    tonic::include_proto!("pvz.v1");
}

use proto::pvz_service_server::{PvzService, PvzServiceServer};
use proto::{GetPvzListRequest, GetPvzListResponse, Pvz};

/// Page size served by `GetPVZList`.
pub const GRPC_PAGE_LIMIT: u32 = 100;

fn status_for(error: &Error) -> Status {
    match error.code() {
        ErrorCode::InternalError => Status::internal("Internal server error"),
        ErrorCode::ServiceUnavailable => Status::unavailable(error.message()),
        ErrorCode::Timeout => Status::deadline_exceeded(error.message()),
        _ => Status::invalid_argument(error.message()),
    }
}

fn to_timestamp(at: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: at.timestamp(),
        nanos: i32::try_from(at.timestamp_subsec_nanos()).unwrap_or_default(),
    }
}

impl From<PickupPointListing> for Pvz {
    fn from(value: PickupPointListing) -> Self {
        let pvz = value.pvz;
        Self {
            id: pvz.id.to_string(),
            registration_date: Some(to_timestamp(pvz.registration_date)),
            city: pvz.city.as_str().to_owned(),
        }
    }
}

/// `PVZService` implementation backed by the listing query port.
#[derive(Clone)]
pub struct PickupPointGrpc {
    query: Arc<dyn PickupPointQuery>,
}

impl PickupPointGrpc {
    pub fn new(query: Arc<dyn PickupPointQuery>) -> Self {
        Self { query }
    }
}

#[tonic::async_trait]
impl PvzService for PickupPointGrpc {
    async fn get_pvz_list(
        &self,
        _request: Request<GetPvzListRequest>,
    ) -> Result<Response<GetPvzListResponse>, Status> {
        let page = PageRequest::first(GRPC_PAGE_LIMIT)
            .map_err(|err| Status::internal(err.to_string()))?;
        let filter = PickupPointFilter::new(None, None, page).map_err(|err| status_for(&err))?;
        let listing = self.query.list_pickup_points(filter).await.map_err(|err| {
            error!(error = %err, "grpc pickup point listing failed");
            status_for(&err)
        })?;
        Ok(Response::new(GetPvzListResponse {
            pvzs: listing.into_iter().map(Pvz::from).collect(),
        }))
    }
}

/// Serve `PVZService` on `addr` until `shutdown` resolves.
///
/// # Errors
/// Returns the transport error when binding or serving fails.
pub async fn serve<F>(
    addr: SocketAddr,
    query: Arc<dyn PickupPointQuery>,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    info!(%addr, "grpc listener starting");
    tonic::transport::Server::builder()
        .add_service(PvzServiceServer::new(PickupPointGrpc::new(query)))
        .serve_with_shutdown(addr, shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPickupPointQuery;
    use crate::domain::{City, PickupPoint};
    use rstest::rstest;
    use tonic::Code;
    use uuid::Uuid;

    #[rstest]
    #[tokio::test]
    async fn lists_first_page_without_date_bounds() {
        let pvz = PickupPoint {
            id: Uuid::new_v4(),
            city: City::SaintPetersburg,
            registration_date: DateTime::<Utc>::UNIX_EPOCH,
        };
        let listing = vec![PickupPointListing {
            pvz: pvz.clone(),
            receptions: Vec::new(),
        }];
        let mut query = MockPickupPointQuery::new();
        query
            .expect_list_pickup_points()
            .withf(|filter| {
                filter.start().is_none()
                    && filter.end().is_none()
                    && filter.page().page() == 1
                    && filter.page().limit() == GRPC_PAGE_LIMIT
            })
            .returning(move |_| Ok(listing.clone()));

        let response = PickupPointGrpc::new(Arc::new(query))
            .get_pvz_list(Request::new(GetPvzListRequest {}))
            .await
            .expect("listing succeeds")
            .into_inner();

        assert_eq!(
            response.pvzs,
            vec![Pvz {
                id: pvz.id.to_string(),
                registration_date: Some(prost_types::Timestamp {
                    seconds: 0,
                    nanos: 0
                }),
                city: "Санкт-Петербург".to_owned(),
            }]
        );
    }

    #[rstest]
    #[case(Error::service_unavailable("pvz repository unavailable"), Code::Unavailable)]
    #[case(Error::internal("boom"), Code::Internal)]
    #[case(Error::timeout("request timed out"), Code::DeadlineExceeded)]
    #[case(Error::invalid_request("bad"), Code::InvalidArgument)]
    #[tokio::test]
    async fn domain_errors_map_to_status_codes(#[case] error: Error, #[case] code: Code) {
        let mut query = MockPickupPointQuery::new();
        query
            .expect_list_pickup_points()
            .returning(move |_| Err(error.clone()));

        let status = PickupPointGrpc::new(Arc::new(query))
            .get_pvz_list(Request::new(GetPvzListRequest {}))
            .await
            .expect_err("listing fails");

        assert_eq!(status.code(), code);
    }

    #[rstest]
    #[tokio::test]
    async fn internal_errors_do_not_leak_their_message() {
        let mut query = MockPickupPointQuery::new();
        query.expect_list_pickup_points().returning(|_| {
            Err(Error::internal(
                "pvz repository error: password authentication failed for user \"secret\"",
            ))
        });

        let status = PickupPointGrpc::new(Arc::new(query))
            .get_pvz_list(Request::new(GetPvzListRequest {}))
            .await
            .expect_err("listing fails");

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Internal server error");
        assert!(!status.message().contains("secret"));
    }
}
