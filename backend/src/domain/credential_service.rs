//! Credential store service.
//!
//! Implements [`CredentialStore`] over a [`UserRepository`] and a
//! [`CredentialHasher`]. Registration checks both unique keys up front so it
//! can report each collision; a race lost at insert time is still reported
//! through the outcome because the repository surfaces unique-index hits as
//! typed variants.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, CredentialStore, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, RegistrationDetails, RegistrationOutcome, User, Username,
    VerificationOutcome,
};

/// Credential store backed by a user repository and a password hasher.
#[derive(Clone)]
pub struct CredentialService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> CredentialService<U, H> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use workout_planner::domain::CredentialService;
    /// use workout_planner::outbound::memory::InMemoryUserRepository;
    /// use workout_planner::outbound::security::Argon2CredentialHasher;
    ///
    /// let service = CredentialService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2CredentialHasher),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername => Error::conflict("username already registered"),
        UserPersistenceError::DuplicateEmail => Error::conflict("email already registered"),
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H> CredentialStore for CredentialService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    async fn register(&self, details: &RegistrationDetails) -> Result<RegistrationOutcome, Error> {
        let username_taken = self
            .users
            .find_by_username(details.username())
            .await
            .map_err(map_user_error)?
            .is_some();
        let email_taken = self
            .users
            .email_exists(details.email())
            .await
            .map_err(map_user_error)?;

        if username_taken || email_taken {
            debug!(
                username = %details.username(),
                username_taken,
                email_taken,
                "registration rejected"
            );
            return Ok(RegistrationOutcome::rejected(username_taken, email_taken));
        }

        let verifier = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            details.username().clone(),
            details.email().clone(),
            verifier,
            self.clock.utc(),
        );

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(username = %user.username(), "user registered");
                Ok(RegistrationOutcome::created())
            }
            Err(UserPersistenceError::DuplicateUsername) => {
                Ok(RegistrationOutcome::rejected(true, false))
            }
            Err(UserPersistenceError::DuplicateEmail) => {
                Ok(RegistrationOutcome::rejected(false, true))
            }
            Err(other) => Err(map_user_error(other)),
        }
    }

    async fn verify(&self, credentials: &LoginCredentials) -> Result<VerificationOutcome, Error> {
        // A name that could never have been registered matches nobody.
        let Ok(username) = Username::new(credentials.username()) else {
            return Ok(VerificationOutcome::unknown_user());
        };

        let Some(user) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
        else {
            debug!(username = %username, "login for unknown user");
            return Ok(VerificationOutcome::unknown_user());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), user.password_verifier())
            .await
            .map_err(map_hasher_error)?;
        debug!(username = %username, verified, "credentials checked");
        Ok(VerificationOutcome::checked(verified))
    }
}
