//! Account service: registration, login and bearer token authorisation.
//!
//! Two token families are accepted. Development tokens are the configured
//! prefix followed by a role name and never touch storage. Everything else
//! must be a token issued by the [`TokenCodec`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, LoginRequest, PasswordHasher, PasswordHasherError, RegisterRequest,
    TokenAuthorizer, TokenClaims, TokenCodec, UserRepository, UserRepositoryError,
};
use crate::domain::service_support::{storage_failure, storage_unavailable};
use crate::domain::{Email, Error, Role, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const INVALID_TOKEN: &str = "invalid token";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => storage_unavailable("user", &message),
        UserRepositoryError::Query { message } => storage_failure("user", &message),
        UserRepositoryError::DuplicateEmail { .. } => {
            Error::user_already_exists("user already exists")
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Account service implementing [`AccountCommand`] and [`TokenAuthorizer`].
#[derive(Clone)]
pub struct AccountService<U> {
    user_repo: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    dummy_token_prefix: String,
}

impl<U> AccountService<U> {
    /// Create an account service.
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        dummy_token_prefix: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
            dummy_token_prefix: dummy_token_prefix.into(),
        }
    }

    fn issue(&self, user: &User) -> Result<String, Error> {
        self.tokens
            .issue(TokenClaims {
                user_id: user.id(),
                role: user.role(),
            })
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn hash_password(&self, password: String) -> Result<String, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<String, Error> {
        let email = Email::new(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if request.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty"));
        }

        let password_hash = self.hash_password(request.password).await?;
        let user = User::new(UserId::random(), email, password_hash, request.role);
        self.user_repo
            .create(&user)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), role = %user.role(), "user registered");
        self.issue(&user)
    }

    async fn login(&self, request: LoginRequest) -> Result<String, Error> {
        let email = Email::new(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .verify_password(request.password, user.password_hash().to_owned())
            .await?;
        if !matches {
            debug!(user_id = %user.id(), "password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.issue(&user)
    }

    fn dummy_login(&self, role: Role) -> String {
        format!("{}{}", self.dummy_token_prefix, role.as_str())
    }
}

impl<U> TokenAuthorizer for AccountService<U>
where
    U: UserRepository,
{
    fn authorize(&self, token: &str) -> Result<Role, Error> {
        if let Some(role) = token.strip_prefix(self.dummy_token_prefix.as_str()) {
            return role
                .parse()
                .map_err(|_| Error::unauthorized(INVALID_TOKEN));
        }

        self.tokens
            .decode(token)
            .map(|claims| claims.role)
            .map_err(|err| {
                debug!(error = %err, "bearer token rejected");
                Error::unauthorized(INVALID_TOKEN)
            })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
