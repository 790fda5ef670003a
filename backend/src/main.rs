//! Backend entry-point: loads settings, wires storage, and runs the HTTP and
//! gRPC listeners.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::AppSettings;

use server::{AuthConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).wrap_err("load settings")?;

    let mut config = ServerConfig::new(settings.http_addr()?, AuthConfig::from_settings(&settings))
        .with_request_timeout(settings.request_timeout())
        .with_page_limit(settings.pagination_limit());

    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .wrap_err("apply database migrations")?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
            .await
            .wrap_err("build database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(make_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let handle = create_server(health_state, config).wrap_err("start http server")?;

    #[cfg(feature = "grpc")]
    let grpc = {
        let addr = settings.grpc_addr()?;
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(backend::inbound::grpc::serve(
            addr,
            handle.pickup_points,
            async move {
                let _ = stopped.await;
            },
        ));
        (stop, task)
    };
    #[cfg(not(feature = "grpc"))]
    drop(handle.pickup_points);

    info!("pvz service started");
    handle.server.await.wrap_err("http server failed")?;

    #[cfg(feature = "grpc")]
    {
        let (stop, task) = grpc;
        let _ = stop.send(());
        task.await
            .wrap_err("grpc task panicked")?
            .wrap_err("grpc server failed")?;
    }
    Ok(())
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("pvz")
        .endpoint("/metrics")
        .build()
        .map_err(|e| color_eyre::eyre::eyre!("configure Prometheus metrics: {e}"))
}
