//! Pickup point API handlers.
//!
//! ```text
//! POST /pvz {"city":"Москва"}
//! GET  /pvz?startDate=2025-01-01T00:00:00Z&endDate=2025-12-31T23:59:59Z&page=1
//! POST /pvz/{pvzId}/close_last_reception
//! POST /pvz/{pvzId}/delete_last_product
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, PickupPointFilter};

use super::ApiResult;
use super::auth::{Authenticated, Employee, Moderator, RequireRole};
use super::deadline::within;
use super::dto::{PvzListingResponse, PvzResponse, ReceptionResponse};
use super::state::HttpState;
use super::validation::{
    FieldName, parse_optional_rfc3339_timestamp, parse_page, parse_uuid, require,
};

const CITY: FieldName = FieldName::new("city");
const PVZ_ID: FieldName = FieldName::new("pvzId");

/// Request body for `POST /pvz`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePvzBody {
    #[schema(example = "Казань")]
    pub city: Option<String>,
}

/// Query string for `GET /pvz`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPvzQuery {
    /// Inclusive lower bound on reception time (RFC 3339).
    pub start_date: Option<String>,
    /// Inclusive upper bound on reception time (RFC 3339).
    pub end_date: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
}

/// Register a pickup point in a supported city.
#[utoipa::path(
    post,
    path = "/pvz",
    request_body = CreatePvzBody,
    responses(
        (status = 201, description = "Pickup point created", body = PvzResponse),
        (status = 400, description = "Unsupported city", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Moderators only", body = Error)
    ),
    tags = ["pvz"],
    operation_id = "createPvz"
)]
#[post("/pvz")]
pub async fn create_pvz(
    _caller: RequireRole<Moderator>,
    state: web::Data<HttpState>,
    payload: web::Json<CreatePvzBody>,
) -> ApiResult<HttpResponse> {
    let city = require(payload.into_inner().city, CITY)?;
    let pvz = within(
        state.request_timeout,
        state.pickup_points.create_pickup_point(&city),
    )
    .await?;
    info!(pvz_id = %pvz.id, city = %pvz.city, "pickup point created");
    Ok(HttpResponse::Created().json(PvzResponse::from(pvz)))
}

/// List pickup points with their receptions and products.
#[utoipa::path(
    get,
    path = "/pvz",
    params(ListPvzQuery),
    responses(
        (status = 200, description = "Pickup points", body = [PvzListingResponse]),
        (status = 400, description = "Invalid query", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["pvz"],
    operation_id = "listPvz"
)]
#[get("/pvz")]
pub async fn list_pvz(
    _caller: Authenticated,
    state: web::Data<HttpState>,
    query: web::Query<ListPvzQuery>,
) -> ApiResult<web::Json<Vec<PvzListingResponse>>> {
    let ListPvzQuery {
        start_date,
        end_date,
        page,
    } = query.into_inner();
    let filter = PickupPointFilter::new(
        parse_optional_rfc3339_timestamp(start_date, FieldName::new("startDate"))?,
        parse_optional_rfc3339_timestamp(end_date, FieldName::new("endDate"))?,
        parse_page(page, state.page_limit, FieldName::new("page"))?,
    )?;
    let listing = within(
        state.request_timeout,
        state.pickup_points_query.list_pickup_points(filter),
    )
    .await?;
    Ok(web::Json(listing.into_iter().map(Into::into).collect()))
}

/// Close the reception currently in progress.
#[utoipa::path(
    post,
    path = "/pvz/{pvzId}/close_last_reception",
    params(("pvzId" = uuid::Uuid, Path, description = "Pickup point identifier")),
    responses(
        (status = 200, description = "Reception closed", body = ReceptionResponse),
        (status = 400, description = "No open reception", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Employees only", body = Error)
    ),
    tags = ["pvz"],
    operation_id = "closeLastReception"
)]
#[post("/pvz/{pvzId}/close_last_reception")]
pub async fn close_last_reception(
    _caller: RequireRole<Employee>,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let pvz_id = parse_uuid(&path.into_inner(), PVZ_ID)?;
    let reception = within(
        state.request_timeout,
        state.receptions.close_last_reception(pvz_id),
    )
    .await?;
    info!(%pvz_id, reception_id = %reception.id, "reception closed");
    Ok(HttpResponse::Ok().json(ReceptionResponse::from(reception)))
}

/// Remove the most recently added product of the open reception.
#[utoipa::path(
    post,
    path = "/pvz/{pvzId}/delete_last_product",
    params(("pvzId" = uuid::Uuid, Path, description = "Pickup point identifier")),
    responses(
        (status = 200, description = "Product removed"),
        (status = 400, description = "No open reception or nothing to delete", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Employees only", body = Error)
    ),
    tags = ["pvz"],
    operation_id = "deleteLastProduct"
)]
#[post("/pvz/{pvzId}/delete_last_product")]
pub async fn delete_last_product(
    _caller: RequireRole<Employee>,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let pvz_id = parse_uuid(&path.into_inner(), PVZ_ID)?;
    let product_id = within(
        state.request_timeout,
        state.products.delete_last_product(pvz_id),
    )
    .await?;
    info!(%pvz_id, %product_id, "last product deleted");
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests;
