//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories implement the domain's driven ports over a shared
//! `diesel-async` + `bb8` pool. Row structs and table definitions stay
//! private to this module; only the adapters, the pool and the migration
//! runner are exported.

mod diesel_error_mapping;
mod diesel_shipment_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_shipment_repository::DieselShipmentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
