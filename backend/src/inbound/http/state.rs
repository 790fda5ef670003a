//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use pagination::DEFAULT_PAGE_LIMIT;

use crate::domain::ports::{
    AccountCommand, PickupPointCommand, PickupPointQuery, ProductCommand, ReceptionCommand,
    TokenAuthorizer,
};

/// Deadline applied to each use-case call when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub authorizer: Arc<dyn TokenAuthorizer>,
    pub pickup_points: Arc<dyn PickupPointCommand>,
    pub pickup_points_query: Arc<dyn PickupPointQuery>,
    pub receptions: Arc<dyn ReceptionCommand>,
    pub products: Arc<dyn ProductCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub authorizer: Arc<dyn TokenAuthorizer>,
    pub pickup_points: Arc<dyn PickupPointCommand>,
    pub pickup_points_query: Arc<dyn PickupPointQuery>,
    pub receptions: Arc<dyn ReceptionCommand>,
    pub products: Arc<dyn ProductCommand>,
    /// Upper bound on a single use-case call.
    pub request_timeout: Duration,
    /// Page size for `GET /pvz`.
    pub page_limit: u32,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state with the default deadline and page size.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            authorizer,
            pickup_points,
            pickup_points_query,
            receptions,
            products,
        } = ports;
        Self {
            accounts,
            authorizer,
            pickup_points,
            pickup_points_query,
            receptions,
            products,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Override the per-request deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the listing page size. Zero is clamped to one.
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }
}
