//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so tests can swap in mocks or in-memory wiring.

use std::sync::Arc;

use crate::domain::ports::{
    AccountRegistration, LoginService, ShipmentCommand, ShipmentQuery, UsersQuery,
};

/// Port bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checks for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Account creation for `POST /register`.
    pub registration: Arc<dyn AccountRegistration>,
    /// Profile lookup for `GET /users/me`.
    pub users: Arc<dyn UsersQuery>,
    /// Shipment mutations.
    pub shipments: Arc<dyn ShipmentCommand>,
    /// Shipment reads.
    pub shipments_query: Arc<dyn ShipmentQuery>,
}

/// Account-side ports, grouped because one service usually provides all
/// three.
#[derive(Clone)]
pub struct AccountPorts {
    /// See [`HttpState::login`].
    pub login: Arc<dyn LoginService>,
    /// See [`HttpState::registration`].
    pub registration: Arc<dyn AccountRegistration>,
    /// See [`HttpState::users`].
    pub users: Arc<dyn UsersQuery>,
}

impl AccountPorts {
    /// Use one implementation for every account port.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: LoginService + AccountRegistration + UsersQuery + 'static,
    {
        Self {
            login: service.clone(),
            registration: service.clone(),
            users: service,
        }
    }
}

impl HttpState {
    /// Assemble state from account ports and the shipment port pair.
    pub fn new(
        accounts: AccountPorts,
        shipments: Arc<dyn ShipmentCommand>,
        shipments_query: Arc<dyn ShipmentQuery>,
    ) -> Self {
        let AccountPorts {
            login,
            registration,
            users,
        } = accounts;
        Self {
            login,
            registration,
            users,
            shipments,
            shipments_query,
        }
    }
}
