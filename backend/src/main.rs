//! Backend entry-point: loads settings, prepares storage, and serves the
//! shipment API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shipment_backend::inbound::http::health::HealthState;
use shipment_backend::inbound::http::session_config::{BuildMode, session_settings_from_process_env};
use shipment_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use shipment_backend::settings::AppSettings;

use server::ServerConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("shipments")
        .endpoint("/metrics")
        .build()
        .map_err(|e| color_eyre::eyre::eyre!("configure Prometheus metrics: {e}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os()).wrap_err("load settings")?;
    let bind_addr = settings.bind_addr()?;
    let session = session_settings_from_process_env(BuildMode::from_debug_assertions())
        .wrap_err("configure session cookies")?;

    let mut config = ServerConfig::new(session, bind_addr).with_demo_data(settings.seed_demo_data);

    if let Some(url) = settings.database_url() {
        let applied = run_pending_migrations(url)
            .await
            .wrap_err("apply database migrations")?;
        info!(applied, "database schema up to date");
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size()))
            .await
            .wrap_err("create database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(make_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config).await?;
    info!(%bind_addr, "shipment API listening");
    server.await?;
    Ok(())
}
