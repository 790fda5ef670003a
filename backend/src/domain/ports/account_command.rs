//! Driving ports for account registration, login and bearer authorisation.
//!
//! Inbound adapters only see tokens and roles; hashing, storage and token
//! formats stay behind these traits.

use async_trait::async_trait;

use crate::domain::{Error, Role};

/// Registration payload as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Login email; validated by the service.
    pub email: String,
    /// Plain-text password; must not be empty.
    pub password: String,
    /// Role granted to the new account.
    pub role: Role,
}

/// Login payload as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Driving port for obtaining bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and return a token for it.
    async fn register(&self, request: RegisterRequest) -> Result<String, Error>;

    /// Check credentials and return a token.
    async fn login(&self, request: LoginRequest) -> Result<String, Error>;

    /// Return a development token for `role` without touching storage.
    fn dummy_login(&self, role: Role) -> String;
}

/// Driving port resolving a bearer token to the caller's role.
#[cfg_attr(test, mockall::automock)]
pub trait TokenAuthorizer: Send + Sync {
    /// Resolve the token, failing with `Unauthorized` when it is not valid.
    fn authorize(&self, token: &str) -> Result<Role, Error>;
}
