//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, Username};

/// Process-local user store.
///
/// One mutex guards the whole collection and every operation takes it
/// exactly once, so each call is atomic with respect to the others.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Username, User>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Username, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

fn unknown_user(username: &Username) -> UserPersistenceError {
    UserPersistenceError::query(format!("user {username} does not exist"))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if users.contains_key(user.username()) {
            return Err(UserPersistenceError::duplicate_username());
        }
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email());
        }
        users.insert(user.username().clone(), user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(username).cloned())
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.values().any(|user| user.email() == email))
    }

    async fn following(
        &self,
        username: &Username,
    ) -> Result<Vec<Username>, UserPersistenceError> {
        Ok(self
            .lock()?
            .get(username)
            .map(|user| user.following().iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn add_following(
        &self,
        username: &Username,
        target: &Username,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.lock()?;
        let user = users
            .get_mut(username)
            .ok_or_else(|| unknown_user(username))?;
        Ok(user.following_mut().insert(target.clone()))
    }

    async fn remove_following(
        &self,
        username: &Username,
        target: &Username,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.lock()?;
        let user = users
            .get_mut(username)
            .ok_or_else(|| unknown_user(username))?;
        Ok(user.following_mut().remove(target))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::PasswordVerifier;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn name(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    fn user(username: &str, email: &str) -> User {
        User::new(
            name(username),
            EmailAddress::new(email).expect("valid email"),
            PasswordVerifier::new("$fake$"),
            Utc::now(),
        )
    }

    #[fixture]
    async fn repo() -> InMemoryUserRepository {
        let repo = InMemoryUserRepository::default();
        repo.insert(&user("alice", "alice@example.com"))
            .await
            .expect("seed alice");
        repo
    }

    #[rstest]
    #[case("alice", "other@example.com", UserPersistenceError::DuplicateUsername)]
    #[case("bob", "ALICE@example.com", UserPersistenceError::DuplicateEmail)]
    #[tokio::test]
    async fn insert_enforces_unique_keys(
        #[future] repo: InMemoryUserRepository,
        #[case] username: &str,
        #[case] email: &str,
        #[case] expected: UserPersistenceError,
    ) {
        let repo = repo.await;
        let err = repo
            .insert(&user(username, email))
            .await
            .expect_err("duplicate");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn following_set_is_duplicate_free_and_ordered(#[future] repo: InMemoryUserRepository) {
        let repo = repo.await;
        let alice = name("alice");
        assert!(repo.add_following(&alice, &name("carol")).await.expect("add"));
        assert!(repo.add_following(&alice, &name("bob")).await.expect("add"));
        assert!(!repo.add_following(&alice, &name("carol")).await.expect("re-add"));

        let following = repo.following(&alice).await.expect("list");
        assert_eq!(following, vec![name("carol"), name("bob")]);

        assert!(repo.remove_following(&alice, &name("carol")).await.expect("remove"));
        assert!(!repo.remove_following(&alice, &name("carol")).await.expect("remove again"));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_follow_nobody(#[future] repo: InMemoryUserRepository) {
        let repo = repo.await;
        assert!(repo.following(&name("ghost")).await.expect("list").is_empty());
        assert!(repo.add_following(&name("ghost"), &name("alice")).await.is_err());
    }
}
