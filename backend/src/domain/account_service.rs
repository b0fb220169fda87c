//! Account domain service: registration, login and profile lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountRegistration, LoginService, PasswordHasher, PasswordHasherError, UserAccount,
    UserRepository, UserRepositoryError, UsersQuery,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId, Username};

/// Message returned for any failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Well-formed Argon2id hash, using the hasher's default cost, that matches
/// no password. Logins for unknown usernames verify against it so they cost
/// the same as logins with a wrong password.
pub(crate) const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$cfuipVFDbHfVvrmodoxEMQ$LMH19MHDNo2YcyuWMUcXa4ETcsXp6X7WkAxUvvRjFV8";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { username } => {
            Error::conflict("Username already exists").with_details(json!({
                "field": "username",
                "code": "duplicate_username",
                "value": username,
            }))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict("Email already exists").with_details(json!({
                "field": "email",
                "code": "duplicate_email",
                "value": email,
            }))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

/// Account service implementing the login, registration and current-user
/// driving ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    user_repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new account service.
    pub fn new(user_repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<R, H> AccountRegistration for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            registration.display_name().clone(),
            registration.role(),
        );
        let account = UserAccount {
            user,
            password_hash,
        };

        self.user_repo
            .insert(&account)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %account.user.id(), username = %account.user.username(), "account registered");
        Ok(account.user)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        // A malformed username cannot belong to any account.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(account) = self
            .user_repo
            .find_by_username(&username)
            .await
            .map_err(map_repository_error)?
        else {
            if let Err(error) = self
                .hasher
                .verify(credentials.password(), DUMMY_PASSWORD_HASH)
                .await
            {
                warn!(%error, "dummy password verification failed");
            }
            warn!(%username, "login attempt for unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !verified {
            warn!(%username, "login attempt with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user.id().clone())
    }
}

#[async_trait]
impl<R, H> UsersQuery for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            // A session can outlive its account.
            .ok_or_else(|| Error::unauthorized("account no longer exists"))
    }
}
