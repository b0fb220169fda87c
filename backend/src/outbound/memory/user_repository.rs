//! Mutex-guarded `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserAccount, UserRepository, UserRepositoryError};
use crate::domain::{User, UserId, Username};

/// In-memory account store keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserAccount>>, UserRepositoryError> {
        self.accounts
            .lock()
            .map_err(|_| UserRepositoryError::connection("user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut accounts = self.lock()?;
        let user = &account.user;
        for existing in accounts.values() {
            if existing.user.username() == user.username() {
                return Err(UserRepositoryError::duplicate_username(
                    user.username().as_ref(),
                ));
            }
            if existing.user.email() == user.email() {
                return Err(UserRepositoryError::duplicate_email(user.email().as_ref()));
            }
        }
        accounts.insert(user.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let accounts = self.lock()?;
        Ok(accounts.get(id).map(|account| account.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let accounts = self.lock()?;
        Ok(accounts
            .values()
            .find(|account| account.user.username() == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, Role};
    use rstest::rstest;

    fn account(username: &str, email: &str) -> UserAccount {
        UserAccount {
            user: User::new(
                UserId::random(),
                Username::new(username).expect("username"),
                EmailAddress::new(email).expect("email"),
                DisplayName::new("Dock Worker").expect("display name"),
                Role::Coordinator,
            ),
            password_hash: "hash".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn stored_account_is_found_by_id_and_username() {
        let repo = InMemoryUserRepository::new();
        let stored = account("dock_worker", "dock@example.com");
        repo.insert(&stored).await.expect("insert");

        let by_id = repo.find_by_id(stored.user.id()).await.expect("find");
        let by_name = repo
            .find_by_username(stored.user.username())
            .await
            .expect("find");

        assert_eq!(by_id, Some(stored.user.clone()));
        assert_eq!(by_name, Some(stored));
    }

    #[rstest]
    #[case::username(
        account("dock_worker", "other@example.com"),
        UserRepositoryError::duplicate_username("dock_worker")
    )]
    #[case::email(
        account("other_worker", "DOCK@example.com"),
        UserRepositoryError::duplicate_email("dock@example.com")
    )]
    #[tokio::test]
    async fn duplicates_are_rejected(
        #[case] candidate: UserAccount,
        #[case] expected: UserRepositoryError,
    ) {
        let repo = InMemoryUserRepository::new();
        repo.insert(&account("dock_worker", "dock@example.com"))
            .await
            .expect("insert");

        assert_eq!(repo.insert(&candidate).await, Err(expected));
    }
}
