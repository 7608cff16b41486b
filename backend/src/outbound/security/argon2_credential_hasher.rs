//! Argon2id-backed `CredentialHasher`.
//!
//! Hashing and verification are CPU-bound, so both run on Tokio's blocking
//! pool to keep request workers responsive.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordVerifier;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Argon2id with the crate's default parameters and a random salt per
/// verifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

fn join_error(error: tokio::task::JoinError) -> CredentialHasherError {
    CredentialHasherError::hash(format!("hashing task failed: {error}"))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<PasswordVerifier, CredentialHasherError> {
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordVerifier::new(hash.to_string()))
                .map_err(|err| CredentialHasherError::hash(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        verifier: &PasswordVerifier,
    ) -> Result<bool, CredentialHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = verifier.as_str().to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&encoded)
                .map_err(|err| CredentialHasherError::malformed_verifier(err.to_string()))?;
            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(CredentialHasherError::hash(err.to_string())),
            }
        })
        .await
        .map_err(join_error)?
    }
}
