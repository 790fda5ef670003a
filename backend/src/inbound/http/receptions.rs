//! Reception API handler.
//!
//! ```text
//! POST /receptions {"pvzId":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::Error;

use super::ApiResult;
use super::auth::{Employee, RequireRole};
use super::deadline::within;
use super::dto::ReceptionResponse;
use super::state::HttpState;
use super::validation::{FieldName, parse_uuid, require};

const PVZ_ID: FieldName = FieldName::new("pvzId");

/// Request body for `POST /receptions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub pvz_id: Option<String>,
}

/// Open a reception at a pickup point.
#[utoipa::path(
    post,
    path = "/receptions",
    request_body = CreateReceptionBody,
    responses(
        (status = 201, description = "Reception opened", body = ReceptionResponse),
        (status = 400, description = "A reception is already open", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Employees only", body = Error)
    ),
    tags = ["receptions"],
    operation_id = "createReception"
)]
#[post("/receptions")]
pub async fn create_reception(
    _caller: RequireRole<Employee>,
    state: web::Data<HttpState>,
    payload: web::Json<CreateReceptionBody>,
) -> ApiResult<HttpResponse> {
    let pvz_id = parse_uuid(&require(payload.into_inner().pvz_id, PVZ_ID)?, PVZ_ID)?;
    let reception = within(state.request_timeout, state.receptions.create_reception(pvz_id)).await?;
    info!(%pvz_id, reception_id = %reception.id, "reception opened");
    Ok(HttpResponse::Created().json(ReceptionResponse::from(reception)))
}
