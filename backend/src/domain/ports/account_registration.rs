//! Driving port for creating accounts.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for self-service registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistration: Send + Sync {
    /// Create an account. Duplicate usernames or emails yield a conflict.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
