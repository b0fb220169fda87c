//! Driving port for user-facing account queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading the caller's own profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return the profile of the authenticated user.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
