//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{Error, TraceId};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unsupported_city("unsupported city"), StatusCode::BAD_REQUEST)]
#[case(
    Error::reception_already_open("can't create one more reception"),
    StatusCode::BAD_REQUEST
)]
#[case(Error::no_open_reception("no open reception"), StatusCode::BAD_REQUEST)]
#[case(Error::no_products("nothing to delete"), StatusCode::BAD_REQUEST)]
#[case(Error::user_already_exists("user already exists"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("missing token"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("forbidden"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("pool closed"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::timeout("request timed out"), StatusCode::GATEWAY_TIMEOUT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_payload(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let error = Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));

    let (status, header, payload) = response_payload(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::no_products("nothing to delete")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"pvzId": TRACE_ID}));

    let (status, header, payload) = response_payload(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload, error);
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let (_, header, payload) = response_payload(&Error::forbidden("forbidden")).await;
    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[tokio::test]
async fn errors_built_in_scope_capture_the_trace_id() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::unauthorized("invalid token") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
