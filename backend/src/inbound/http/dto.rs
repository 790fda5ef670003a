//! Response bodies shared by the HTTP handlers.
//!
//! Wire names are camelCase and enum values use their Cyrillic or
//! snake_case storage names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    City, PickupPoint, PickupPointListing, Product, ProductType, Reception, ReceptionListing,
    ReceptionStatus,
};

/// Bearer token returned by the account endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Value for the `Authorization: Bearer` header.
    pub token: String,
}

/// Pickup point body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PvzResponse {
    pub id: Uuid,
    #[schema(value_type = String, example = "Москва")]
    pub city: City,
    pub registration_date: DateTime<Utc>,
}

impl From<PickupPoint> for PvzResponse {
    fn from(value: PickupPoint) -> Self {
        Self {
            id: value.id,
            city: value.city,
            registration_date: value.registration_date,
        }
    }
}

/// Reception body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionResponse {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    #[schema(value_type = String, example = "in_progress")]
    pub status: ReceptionStatus,
}

impl From<Reception> for ReceptionResponse {
    fn from(value: Reception) -> Self {
        Self {
            id: value.id,
            date_time: value.date_time,
            pvz_id: value.pvz_id,
            status: value.status,
        }
    }
}

/// Product body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "электроника")]
    pub product_type: ProductType,
    pub reception_id: Uuid,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            date_time: value.date_time,
            product_type: value.product_type,
            reception_id: value.reception_id,
        }
    }
}

/// A reception with its products, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReceptionListingResponse {
    pub reception: ReceptionResponse,
    pub products: Vec<ProductResponse>,
}

impl From<ReceptionListing> for ReceptionListingResponse {
    fn from(value: ReceptionListing) -> Self {
        Self {
            reception: value.reception.into(),
            products: value.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// One entry of `GET /pvz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PvzListingResponse {
    pub pvz: PvzResponse,
    pub receptions: Vec<ReceptionListingResponse>,
}

impl From<PickupPointListing> for PvzListingResponse {
    fn from(value: PickupPointListing) -> Self {
        Self {
            pvz: value.pvz.into(),
            receptions: value.receptions.into_iter().map(Into::into).collect(),
        }
    }
}
