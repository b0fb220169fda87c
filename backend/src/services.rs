//! Composition root shared by the server, the seeding binary and tests.
//!
//! [`ServiceGraph::assemble`] wires domain services over whichever driven
//! adapters the caller picked, so the Diesel and in-memory configurations
//! go through identical service code.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{ShipmentRepository, UserRepository};
use crate::domain::{AccountService, DemoDataSeeder, ShipmentCommandService, ShipmentQueryService};
use crate::inbound::http::state::{AccountPorts, HttpState};
use crate::outbound::security::Argon2PasswordHasher;

/// Driving ports for the HTTP adapter plus the demo seeder over the same
/// repositories.
pub struct ServiceGraph<U> {
    /// Ports handed to handlers.
    pub http_state: HttpState,
    /// Demo data seeder writing through the same services.
    pub seeder: DemoDataSeeder<U>,
}

impl<U> ServiceGraph<U>
where
    U: UserRepository + 'static,
{
    /// Wire account and shipment services over `users` and `shipments`.
    pub fn assemble<S>(users: Arc<U>, shipments: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: ShipmentRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher::new()),
        ));
        let command = Arc::new(ShipmentCommandService::new(shipments.clone(), clock.clone()));
        let query = Arc::new(ShipmentQueryService::new(shipments, clock.clone()));

        let seeder = DemoDataSeeder::new(users, accounts.clone(), command.clone(), clock);
        let http_state = HttpState::new(AccountPorts::from_service(accounts), command, query);
        Self { http_state, seeder }
    }
}
