//! Builders wiring repositories into services and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use backend::domain::ports::{
    EntityMetrics, NoOpEntityMetrics, PickupPointQuery, PickupPointRepository, ProductRepository,
    ReceptionRepository, UserRepository,
};
use backend::domain::{AccountService, PickupPointService, ProductService, ReceptionService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::MemoryStore;
use backend::outbound::persistence::{
    DieselPickupPointRepository, DieselProductRepository, DieselReceptionRepository,
    DieselUserRepository,
};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};
use tracing::info;

#[cfg(feature = "metrics")]
use backend::outbound::metrics::PrometheusEntityMetrics;

use super::ServerConfig;

/// One repository per aggregate, however they are backed.
struct Repositories<U, P, R, D> {
    users: Arc<U>,
    pickup_points: Arc<P>,
    receptions: Arc<R>,
    products: Arc<D>,
}

impl Repositories<MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: Arc::clone(&store),
            pickup_points: Arc::clone(&store),
            receptions: Arc::clone(&store),
            products: store,
        }
    }
}

/// Collaborators shared by every service.
struct ServiceDeps {
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn EntityMetrics>,
    tokens: Arc<JwtTokenCodec>,
    dummy_token_prefix: String,
}

/// Output of [`build_http_state`].
pub(crate) struct BuiltState {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) pickup_points: Arc<dyn PickupPointQuery>,
}

fn build_ports<U, P, R, D>(
    repos: Repositories<U, P, R, D>,
    deps: ServiceDeps,
) -> (HttpStatePorts, Arc<dyn PickupPointQuery>)
where
    U: UserRepository + 'static,
    P: PickupPointRepository + 'static,
    R: ReceptionRepository + 'static,
    D: ProductRepository + 'static,
{
    let ServiceDeps {
        clock,
        metrics,
        tokens,
        dummy_token_prefix,
    } = deps;

    let accounts = Arc::new(AccountService::new(
        repos.users,
        Arc::new(Argon2PasswordHasher),
        tokens,
        dummy_token_prefix,
    ));
    let pickup_points = Arc::new(PickupPointService::new(
        repos.pickup_points,
        Arc::clone(&clock),
        Arc::clone(&metrics),
    ));
    let receptions = Arc::new(ReceptionService::new(
        repos.receptions,
        Arc::clone(&clock),
        Arc::clone(&metrics),
    ));
    let products = Arc::new(ProductService::new(repos.products, clock, metrics));

    let query: Arc<dyn PickupPointQuery> = pickup_points.clone();
    let ports = HttpStatePorts {
        accounts: accounts.clone(),
        authorizer: accounts,
        pickup_points,
        pickup_points_query: Arc::clone(&query),
        receptions,
        products,
    };
    (ports, query)
}

#[cfg(feature = "metrics")]
fn build_entity_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn EntityMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusEntityMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("entity metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpEntityMetrics)),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_entity_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn EntityMetrics>> {
    Ok(Arc::new(NoOpEntityMetrics))
}

/// Build the HTTP state and the listing query shared with gRPC.
///
/// Uses Diesel repositories when the configuration carries a pool, otherwise
/// a single in-memory store backs every port.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<BuiltState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let deps = ServiceDeps {
        tokens: Arc::new(JwtTokenCodec::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl,
            Arc::clone(&clock),
        )),
        clock,
        metrics: build_entity_metrics(config)?,
        dummy_token_prefix: config.auth.dummy_token_prefix.clone(),
    };

    let (ports, pickup_points) = match &config.db_pool {
        Some(pool) => build_ports(
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                pickup_points: Arc::new(DieselPickupPointRepository::new(pool.clone())),
                receptions: Arc::new(DieselReceptionRepository::new(pool.clone())),
                products: Arc::new(DieselProductRepository::new(pool.clone())),
            },
            deps,
        ),
        None => {
            info!("no database configured; state is kept in memory");
            build_ports(Repositories::in_memory(), deps)
        }
    };

    let http_state = HttpState::new(ports)
        .with_request_timeout(config.request_timeout)
        .with_page_limit(config.page_limit);
    Ok(BuiltState {
        http_state: web::Data::new(http_state),
        pickup_points,
    })
}
