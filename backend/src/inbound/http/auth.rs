//! Bearer token extractors used by HTTP handlers.
//!
//! Handlers declare the access they need in their signature:
//! [`Authenticated`] for any valid token, [`RequireRole`] for one role. The
//! role is resolved once, before the handler body runs, through the
//! [`TokenAuthorizer`](crate::domain::ports::TokenAuthorizer) held in
//! [`HttpState`].

use std::marker::PhantomData;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, Role};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Role marker types for [`RequireRole`].
pub trait RoleRequirement {
    /// The only role admitted.
    const ROLE: Role;
}

/// Marker admitting pickup point employees.
#[derive(Debug)]
pub struct Employee;

impl RoleRequirement for Employee {
    const ROLE: Role = Role::Employee;
}

/// Marker admitting moderators.
#[derive(Debug)]
pub struct Moderator;

impl RoleRequirement for Moderator {
    const ROLE: Role = Role::Moderator;
}

/// Caller presenting any valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated {
    role: Role,
}

impl Authenticated {
    /// Role carried by the token.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Caller whose token carries exactly the role named by `R`.
#[derive(Debug)]
pub struct RequireRole<R> {
    _role: PhantomData<R>,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing token"))
}

fn resolve_role(req: &HttpRequest) -> Result<Role, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not registered"))?;
    let token = bearer_token(req)?;
    state.authorizer.authorize(token)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_role(req).map(|role| Self { role }))
    }
}

impl<R: RoleRequirement> FromRequest for RequireRole<R> {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let outcome = resolve_role(req).and_then(|role| {
            if role == R::ROLE {
                Ok(Self { _role: PhantomData })
            } else {
                debug!(%role, required = %R::ROLE, "role check failed");
                Err(Error::forbidden("forbidden"))
            }
        });
        ready(outcome)
    }
}
