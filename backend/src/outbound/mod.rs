//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel, plus the pool
//!   and embedded migrations.
//! - **memory**: process-local repositories for database-less runs and tests.
//! - **security**: Argon2id password hashing.

pub mod memory;
pub mod persistence;
pub mod security;
