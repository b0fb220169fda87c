//! Builders for HTTP state over the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use shipment_backend::services::ServiceGraph;
use shipment_backend::domain::ports::UserRepository;
use shipment_backend::inbound::http::state::HttpState;
use shipment_backend::outbound::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use shipment_backend::outbound::persistence::{DieselShipmentRepository, DieselUserRepository};

use super::ServerConfig;

async fn finish<U>(graph: ServiceGraph<U>, seed_demo_data: bool) -> std::io::Result<HttpState>
where
    U: UserRepository + 'static,
{
    if seed_demo_data {
        let outcome = graph
            .seeder
            .seed()
            .await
            .map_err(|err| std::io::Error::other(format!("demo data seeding failed: {err}")))?;
        info!(
            shipments_created = outcome.shipments_created,
            "demo data ready"
        );
    }
    Ok(graph.http_state)
}

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and process memory otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when demo seeding was requested and failed.
pub(crate) async fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            let graph = ServiceGraph::assemble(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselShipmentRepository::new(pool.clone())),
                clock,
            );
            finish(graph, config.seed_demo_data).await?
        }
        None => {
            warn!("no database configured; shipments are kept in memory only");
            let graph = ServiceGraph::assemble(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryShipmentRepository::new()),
                clock,
            );
            finish(graph, config.seed_demo_data).await?
        }
    };
    Ok(web::Data::new(state))
}
