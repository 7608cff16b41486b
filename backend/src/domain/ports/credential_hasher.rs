//! Port for one-way password verifiers.
//!
//! The domain only needs "derive an opaque verifier" and "check a password
//! against one"; the algorithm lives in an outbound adapter.

use async_trait::async_trait;

use crate::domain::PasswordVerifier;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum CredentialHasherError {
        /// Deriving a verifier failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored verifier could not be parsed.
        MalformedVerifier { message: String } => "stored password verifier is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Derive a fresh verifier for `password`.
    async fn hash(&self, password: &str) -> Result<PasswordVerifier, CredentialHasherError>;

    /// Check `password` against `verifier`. A mismatch is `Ok(false)`.
    async fn verify(
        &self,
        password: &str,
        verifier: &PasswordVerifier,
    ) -> Result<bool, CredentialHasherError>;
}
