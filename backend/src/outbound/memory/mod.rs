//! Process-local repositories.
//!
//! Used when no database URL is configured and by HTTP tests. They enforce
//! the same owner scoping, uniqueness and ordering rules as the PostgreSQL
//! adapters, but lose everything on restart.

mod shipment_repository;
mod user_repository;

pub use shipment_repository::InMemoryShipmentRepository;
pub use user_repository::InMemoryUserRepository;
