//! Port abstraction for user persistence adapters and their errors.
//!
//! The repository owns user documents and their following sets. Following
//! mutations are single atomic operations on one user's set so concurrent
//! follows of the same target never produce duplicates.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An insert hit the unique username index.
        DuplicateUsername => "username already registered",
        /// An insert hit the unique email index.
        DuplicateEmail => "email already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with a duplicate variant when either unique
    /// key is already taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any user already holds `email`.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Current following list of `username`, in insertion order. Unknown
    /// users follow nobody.
    async fn following(&self, username: &Username)
    -> Result<Vec<Username>, UserPersistenceError>;

    /// Add `target` to `username`'s following set if absent.
    ///
    /// Returns whether the set changed.
    async fn add_following(
        &self,
        username: &Username,
        target: &Username,
    ) -> Result<bool, UserPersistenceError>;

    /// Remove `target` from `username`'s following set if present.
    ///
    /// Returns whether the set changed.
    async fn remove_following(
        &self,
        username: &Username,
        target: &Username,
    ) -> Result<bool, UserPersistenceError>;
}
