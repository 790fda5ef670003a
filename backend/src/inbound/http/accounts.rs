//! Account API handlers.
//!
//! ```text
//! POST /dummyLogin {"role":"moderator"}
//! POST /register {"email":"a@b.c","password":"secret","role":"employee"}
//! POST /login {"email":"a@b.c","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{LoginRequest, RegisterRequest};

use super::ApiResult;
use super::deadline::within;
use super::dto::TokenResponse;
use super::state::HttpState;
use super::validation::{FieldName, parse_role, require};

const ROLE: FieldName = FieldName::new("role");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");

/// Request body for `POST /dummyLogin`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DummyLoginBody {
    #[schema(example = "moderator")]
    pub role: Option<String>,
}

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterBody {
    #[schema(example = "employee@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "employee")]
    pub role: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginBody {
    #[schema(example = "employee@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Issue a development token for the requested role.
#[utoipa::path(
    post,
    path = "/dummyLogin",
    request_body = DummyLoginBody,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "dummyLogin",
    security([])
)]
#[post("/dummyLogin")]
pub async fn dummy_login(
    state: web::Data<HttpState>,
    payload: web::Json<DummyLoginBody>,
) -> ApiResult<HttpResponse> {
    let role = parse_role(&require(payload.into_inner().role, ROLE)?, ROLE)?;
    let token = state.accounts.dummy_login(role);
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Register an account and return its token.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid request or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let RegisterBody {
        email,
        password,
        role,
    } = payload.into_inner();
    let request = RegisterRequest {
        email: require(email, EMAIL)?,
        password: require(password, PASSWORD)?,
        role: parse_role(&require(role, ROLE)?, ROLE)?,
    };
    let token = within(state.request_timeout, state.accounts.register(request)).await?;
    Ok(HttpResponse::Created().json(TokenResponse { token }))
}

/// Exchange credentials for a token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<HttpResponse> {
    let LoginBody { email, password } = payload.into_inner();
    let request = LoginRequest {
        email: require(email, EMAIL)?,
        password: require(password, PASSWORD)?,
    };
    let token = within(state.request_timeout, state.accounts.login(request)).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
