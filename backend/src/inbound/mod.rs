//! Inbound adapters that translate external requests into domain calls
//! while keeping framework details at the edge.
//!
//! The REST API lives under [`http`].

pub mod http;
