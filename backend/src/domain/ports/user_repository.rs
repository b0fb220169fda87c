//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } =>
            "username {username} already exists",
        /// The email address is already registered.
        DuplicateEmail { email: String } =>
            "email {email} already exists",
    }
}

/// A user together with their stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public profile.
    pub user: User,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Port for storing and loading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account, rejecting duplicate usernames and emails.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;

    /// Load a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Load an account, including its hash, by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;
}
