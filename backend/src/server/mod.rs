//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{AuthConfig, ServerConfig};

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::PickupPointQuery;
use backend::inbound::http::accounts::{dummy_login, login, register};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::products::add_product;
use backend::inbound::http::pvz::{close_last_reception, create_pvz, delete_last_product, list_pvz};
use backend::inbound::http::receptions::create_reception;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{json_error_handler, query_error_handler};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(dummy_login)
        .service(register)
        .service(login)
        .service(create_pvz)
        .service(list_pvz)
        .service(close_last_reception)
        .service(delete_last_product)
        .service(create_reception)
        .service(add_product)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// A bound HTTP server plus the listing query the gRPC surface serves.
pub struct ServerHandle {
    pub server: Server,
    pub pickup_points: Arc<dyn PickupPointQuery>,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with binding, storage and optional metrics settings.
///
/// # Returns
/// A [`ServerHandle`] whose server must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when metric registration, binding the socket
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<ServerHandle> {
    let server_health_state = health_state.clone();
    let built = build_http_state(&config)?;
    let http_state = built.http_state;
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(ServerHandle {
        server,
        pickup_points: built.pickup_points,
    })
}
