//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PVZ_*` environment variables and an optional
//! config file. Every field is optional; the accessors supply defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_PAGINATION_LIMIT: u32 = 10;
const DEFAULT_DUMMY_TOKEN_PREFIX: &str = "dummy-";
const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEV_JWT_SECRET: &str = "pvz-development-secret-change-me";

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A listen address did not parse as `host:port`.
    #[error("{field} is not a socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Process configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PVZ")]
pub struct AppSettings {
    /// Postgres URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// HTTP listen address.
    pub http_addr: Option<String>,
    /// gRPC listen address.
    pub grpc_addr: Option<String>,
    /// Deadline for each use-case call, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Page size for the pickup point listing.
    pub pagination_limit: Option<u32>,
    /// Prefix marking development tokens.
    pub dummy_token_prefix: Option<String>,
    /// HS256 signing secret.
    pub jwt_secret: Option<String>,
    /// Lifetime of issued tokens, in minutes.
    pub jwt_expiration_minutes: Option<i64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

fn parse_addr(field: &'static str, value: Option<&str>, default: &str) -> Result<SocketAddr, SettingsError> {
    let raw = value.unwrap_or(default);
    raw.parse().map_err(|_| SettingsError::InvalidAddress {
        field,
        value: raw.to_owned(),
    })
}

impl AppSettings {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn http_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_addr("http_addr", self.http_addr.as_deref(), DEFAULT_HTTP_ADDR)
    }

    pub fn grpc_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_addr("grpc_addr", self.grpc_addr.as_deref(), DEFAULT_GRPC_ADDR)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    pub fn pagination_limit(&self) -> u32 {
        self.pagination_limit
            .unwrap_or(DEFAULT_PAGINATION_LIMIT)
            .max(1)
    }

    pub fn dummy_token_prefix(&self) -> &str {
        self.dummy_token_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DUMMY_TOKEN_PREFIX)
    }

    /// Signing secret; falls back to a fixed development value with a warning.
    pub fn jwt_secret(&self) -> Zeroizing<Vec<u8>> {
        match self.jwt_secret.as_deref().filter(|secret| !secret.is_empty()) {
            Some(secret) => Zeroizing::new(secret.as_bytes().to_vec()),
            None => {
                warn!("PVZ_JWT_SECRET not set; using the development secret");
                Zeroizing::new(DEV_JWT_SECRET.as_bytes().to_vec())
            }
        }
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(
            self.jwt_expiration_minutes
                .unwrap_or(DEFAULT_JWT_EXPIRATION_MINUTES),
        )
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
