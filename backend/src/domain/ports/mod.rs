//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports are implemented by domain services and
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_registration;
mod login_service;
mod password_hasher;
mod shipment_command;
mod shipment_query;
mod shipment_repository;
mod user_repository;
mod users_query;

pub use account_registration::AccountRegistration;
pub use login_service::LoginService;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use shipment_command::{
    CreateShipmentRequest, DeleteShipmentRequest, ShipmentCommand, UpdateShipmentRequest,
};
pub use shipment_query::{
    GetShipmentRequest, ListShipmentsRequest, ListShipmentsResponse, ShipmentQuery, ShipmentView,
};
pub use shipment_repository::{ShipmentRepository, ShipmentRepositoryError};
pub use user_repository::{UserAccount, UserRepository, UserRepositoryError};
pub use users_query::UsersQuery;

#[cfg(test)]
pub use account_registration::MockAccountRegistration;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use shipment_command::MockShipmentCommand;
#[cfg(test)]
pub use shipment_query::MockShipmentQuery;
#[cfg(test)]
pub use shipment_repository::MockShipmentRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use users_query::MockUsersQuery;
