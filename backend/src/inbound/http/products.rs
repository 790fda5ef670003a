//! Product API handler.
//!
//! ```text
//! POST /products {"pvzId":"3fa85f64-5717-4562-b3fc-2c963f66afa6","type":"обувь"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::Error;

use super::ApiResult;
use super::auth::{Employee, RequireRole};
use super::deadline::within;
use super::dto::ProductResponse;
use super::state::HttpState;
use super::validation::{FieldName, parse_product_type, parse_uuid, require};

const PVZ_ID: FieldName = FieldName::new("pvzId");
const TYPE: FieldName = FieldName::new("type");

/// Request body for `POST /products`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProductBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub pvz_id: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "обувь")]
    pub product_type: Option<String>,
}

/// Record a product against the open reception.
#[utoipa::path(
    post,
    path = "/products",
    request_body = AddProductBody,
    responses(
        (status = 201, description = "Product added", body = ProductResponse),
        (status = 400, description = "No open reception", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Employees only", body = Error)
    ),
    tags = ["products"],
    operation_id = "addProduct"
)]
#[post("/products")]
pub async fn add_product(
    _caller: RequireRole<Employee>,
    state: web::Data<HttpState>,
    payload: web::Json<AddProductBody>,
) -> ApiResult<HttpResponse> {
    let AddProductBody {
        pvz_id,
        product_type,
    } = payload.into_inner();
    let pvz_id = parse_uuid(&require(pvz_id, PVZ_ID)?, PVZ_ID)?;
    let product_type = parse_product_type(&require(product_type, TYPE)?, TYPE)?;
    let product = within(
        state.request_timeout,
        state.products.add_product(pvz_id, product_type),
    )
    .await?;
    info!(%pvz_id, product_id = %product.id, "product added");
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}
