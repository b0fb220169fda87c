//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserAccount, UserRepository, UserRepositoryError};
use crate::domain::{DisplayName, EmailAddress, Role, User, UserId, UserValidationError, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, violated_unique_constraint};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserRepositoryError> {
    let corrupt = |err: UserValidationError| {
        UserRepositoryError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let username = Username::new(row.username.clone()).map_err(corrupt)?;
    let email = EmailAddress::new(row.email.clone()).map_err(corrupt)?;
    let display_name = DisplayName::new(row.display_name.clone()).map_err(corrupt)?;
    let role = row.role.parse::<Role>().map_err(corrupt)?;

    Ok(UserAccount {
        user: User::new(
            UserId::from_uuid(row.id),
            username,
            email,
            display_name,
            role,
        ),
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let user = &account.user;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            display_name: user.display_name().as_ref(),
            password_hash: &account.password_hash,
            role: user.role().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match violated_unique_constraint(&err) {
                Some(USERNAME_CONSTRAINT) => {
                    UserRepositoryError::duplicate_username(user.username().as_ref())
                }
                Some(EMAIL_CONSTRAINT) => UserRepositoryError::duplicate_email(user.email().as_ref()),
                _ => map_diesel(err),
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(|row| row_to_account(row).map(|account| account.user))
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }
}
