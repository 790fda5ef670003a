//! Handler tests for the pickup point endpoints.

use super::*;
use crate::domain::{
    City, PickupPoint, PickupPointListing, Product, ProductType, Reception, ReceptionListing,
    ReceptionStatus, Role,
};
use crate::inbound::http::test_utils::MockPorts;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test};
use chrono::{DateTime, Duration, Utc};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

fn at(minute: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(minute)
}

async fn send(ports: MockPorts, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(ports.into_state())
            .service(create_pvz)
            .service(list_pvz)
            .service(close_last_reception)
            .service(delete_last_product),
    )
    .await;
    let response = test::call_service(
        &app,
        request
            .insert_header((AUTHORIZATION, "Bearer token"))
            .to_request(),
    )
    .await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn moderator_creates_pickup_point() {
    let created = PickupPoint {
        id: Uuid::new_v4(),
        city: City::Kazan,
        registration_date: at(1),
    };
    let mut ports = MockPorts::authorizing_as(Role::Moderator);
    let returned = created.clone();
    ports
        .pickup_points
        .expect_create_pickup_point()
        .withf(|city: &str| city == "Казань")
        .returning(move |_| Ok(returned.clone()));

    let (status, body) = send(
        ports,
        test::TestRequest::post()
            .uri("/pvz")
            .set_json(json!({"city": "Казань"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("city"), Some(&json!("Казань")));
    assert_eq!(body.get("id"), Some(&json!(created.id)));
    assert!(body.get("registrationDate").is_some());
}

#[rstest]
#[actix_web::test]
async fn employee_cannot_create_pickup_point() {
    let (status, body) = send(
        MockPorts::authorizing_as(Role::Employee),
        test::TestRequest::post()
            .uri("/pvz")
            .set_json(json!({"city": "Москва"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.get("message"), Some(&json!("forbidden")));
}

#[rstest]
#[actix_web::test]
async fn unsupported_city_is_bad_request() {
    let mut ports = MockPorts::authorizing_as(Role::Moderator);
    ports
        .pickup_points
        .expect_create_pickup_point()
        .returning(|_| Err(Error::unsupported_city("unsupported city")));

    let (status, body) = send(
        ports,
        test::TestRequest::post()
            .uri("/pvz")
            .set_json(json!({"city": "Новосибирск"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("code"), Some(&json!("unsupported_city")));
}

#[rstest]
#[actix_web::test]
async fn listing_passes_filter_and_nests_rows() {
    let pvz = PickupPoint {
        id: Uuid::new_v4(),
        city: City::Moscow,
        registration_date: at(0),
    };
    let reception = Reception {
        id: Uuid::new_v4(),
        date_time: at(10),
        pvz_id: pvz.id,
        status: ReceptionStatus::InProgress,
    };
    let product = Product {
        id: Uuid::new_v4(),
        date_time: at(11),
        product_type: ProductType::Electronics,
        reception_id: reception.id,
    };
    let listing = vec![PickupPointListing {
        pvz: pvz.clone(),
        receptions: vec![ReceptionListing {
            reception: reception.clone(),
            products: vec![product.clone()],
        }],
    }];

    let mut ports = MockPorts::authorizing_as(Role::Employee);
    ports
        .pickup_points_query
        .expect_list_pickup_points()
        .withf(|filter| {
            filter.start().is_some() && filter.end().is_none() && filter.page().page() == 2
        })
        .returning(move |_| Ok(listing.clone()));

    let (status, body) = send(
        ports,
        test::TestRequest::get().uri("/pvz?startDate=2025-01-01T00:00:00Z&page=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/0/pvz/id"), Some(&json!(pvz.id)));
    assert_eq!(
        body.pointer("/0/receptions/0/reception/status"),
        Some(&json!("in_progress"))
    );
    assert_eq!(
        body.pointer("/0/receptions/0/products/0/type"),
        Some(&json!("электроника"))
    );
}

#[rstest]
#[case("/pvz?startDate=yesterday")]
#[case("/pvz?page=0")]
#[case("/pvz?startDate=2025-02-01T00:00:00Z&endDate=2025-01-01T00:00:00Z")]
#[actix_web::test]
async fn invalid_listing_queries_are_bad_request(#[case] uri: &str) {
    let (status, body) = send(
        MockPorts::authorizing_as(Role::Moderator),
        test::TestRequest::get().uri(uri),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("code"), Some(&json!("invalid_request")));
}

#[rstest]
#[actix_web::test]
async fn close_returns_closed_reception() {
    let pvz_id = Uuid::new_v4();
    let closed = Reception {
        id: Uuid::new_v4(),
        date_time: at(3),
        pvz_id,
        status: ReceptionStatus::Close,
    };
    let mut ports = MockPorts::authorizing_as(Role::Employee);
    ports
        .receptions
        .expect_close_last_reception()
        .with(eq(pvz_id))
        .returning(move |_| Ok(closed.clone()));

    let (status, body) = send(
        ports,
        test::TestRequest::post().uri(&format!("/pvz/{pvz_id}/close_last_reception")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status"), Some(&json!("close")));
    assert_eq!(body.get("pvzId"), Some(&json!(pvz_id)));
}

#[rstest]
#[actix_web::test]
async fn close_without_open_reception_is_bad_request() {
    let mut ports = MockPorts::authorizing_as(Role::Employee);
    ports
        .receptions
        .expect_close_last_reception()
        .returning(|_| Err(Error::no_open_reception("no open reception to close")));

    let (status, body) = send(
        ports,
        test::TestRequest::post().uri(&format!(
            "/pvz/{}/close_last_reception",
            Uuid::new_v4()
        )),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("message"), Some(&json!("no open reception to close")));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_empty_ok() {
    let pvz_id = Uuid::new_v4();
    let mut ports = MockPorts::authorizing_as(Role::Employee);
    ports
        .products
        .expect_delete_last_product()
        .with(eq(pvz_id))
        .returning(|_| Ok(Uuid::new_v4()));

    let (status, body) = send(
        ports,
        test::TestRequest::post().uri(&format!("/pvz/{pvz_id}/delete_last_product")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn malformed_path_id_is_bad_request() {
    let (status, body) = send(
        MockPorts::authorizing_as(Role::Employee),
        test::TestRequest::post().uri("/pvz/not-a-uuid/delete_last_product"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.pointer("/details/code"), Some(&json!("invalid_uuid")));
}
