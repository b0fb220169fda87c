//! Seed the demo coordinator account and sample shipments into PostgreSQL.
//!
//! Reads the same `SHIPMENTS_*` settings as the server, applies pending
//! migrations, then seeds. Running it twice changes nothing.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shipment_backend::outbound::persistence::{
    DbPool, DieselShipmentRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use shipment_backend::services::ServiceGraph;
use shipment_backend::settings::AppSettings;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).wrap_err("load settings")?;
    let url = settings
        .database_url()
        .ok_or_else(|| eyre!("SHIPMENTS_DATABASE_URL must be set to seed demo data"))?;

    run_pending_migrations(url)
        .await
        .wrap_err("apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size()))
        .await
        .wrap_err("create database pool")?;

    let graph = ServiceGraph::assemble(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselShipmentRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let outcome = graph.seeder.seed().await.wrap_err("seed demo data")?;
    info!(
        user_created = outcome.user_created,
        shipments_created = outcome.shipments_created,
        shipments_skipped = outcome.shipments_skipped,
        "demo data seeded"
    );
    Ok(())
}
