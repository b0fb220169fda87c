//! Shipment logistics backend.
//!
//! Session-authenticated REST API over owner-scoped shipments, with
//! PostgreSQL persistence via Diesel and an in-memory fallback.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod services;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
