//! Driving port for registration and credential checks.
//!
//! Inbound adapters call this port to create accounts and to authenticate
//! without knowing how users or verifiers are stored, which keeps handler
//! tests deterministic.

use async_trait::async_trait;

use crate::domain::{
    Error, LoginCredentials, RegistrationDetails, RegistrationOutcome, VerificationOutcome,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a user with an empty following set.
    ///
    /// Username and email collisions are reported through the outcome, not
    /// as errors.
    async fn register(&self, details: &RegistrationDetails) -> Result<RegistrationOutcome, Error>;

    /// Check a username/password pair.
    async fn verify(&self, credentials: &LoginCredentials) -> Result<VerificationOutcome, Error>;
}
