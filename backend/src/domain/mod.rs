//! Domain primitives, aggregates and services.
//!
//! Purpose: define the pickup point, reception and product model, the
//! lifecycle rules that govern it, and the ports the rest of the crate plugs
//! into. Nothing in here knows about HTTP, gRPC or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - City, PickupPoint, Reception, ReceptionStatus, Product, ProductType:
//!   the persisted entities.
//! - ReceptionService, ProductService, PickupPointService, AccountService:
//!   driving port implementations.

pub mod account_service;
pub mod error;
pub mod listing;
pub mod pickup_point;
pub mod pickup_point_service;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod reception;
pub mod reception_service;
pub mod role;
mod service_support;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{PickupPointFilter, PickupPointListing, ReceptionListing};
pub use self::pickup_point::{City, PickupPoint, UnsupportedCity};
pub use self::pickup_point_service::PickupPointService;
pub use self::product::{Product, ProductDraft, ProductType, UnsupportedProductType};
pub use self::product_service::ProductService;
pub use self::reception::{Reception, ReceptionStatus, UnknownReceptionStatus};
pub use self::reception_service::ReceptionService;
pub use self::role::{Role, UnknownRole};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("forbidden"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
