//! HTTP inbound adapter exposing the REST API.

pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod shipments;
pub mod shipments_dto;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;
