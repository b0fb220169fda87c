//! Domain layer: entities, value types, ports and services.
//!
//! Nothing in this module knows about HTTP or SQL. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.

pub mod account_service;
pub mod auth;
pub mod demo_data;
pub mod error;
pub mod ports;
pub mod shipment;
pub mod shipment_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration, RegistrationField,
    RegistrationInput, RegistrationValidationError,
};
pub use self::demo_data::{DEMO_PASSWORD, DEMO_USERNAME, DemoDataSeeder, DemoSeedOutcome};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::shipment::*;
pub use self::shipment_service::{ShipmentCommandService, ShipmentQueryService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, EmailAddress, Role, User, UserId, UserValidationError, Username,
};
