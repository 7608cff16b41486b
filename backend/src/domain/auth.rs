//! Credential primitives: login and registration payloads, stored password
//! verifiers and the outcomes reported by the credential store.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the credential store.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming. It is not
///   checked against the username format: a malformed name simply matches
///   no user.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use workout_planner::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "s3cret").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures for a registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username or email failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl RegistrationValidationError {
    /// Name of the offending field, used in error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(inner) => inner.field(),
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Validate raw registration inputs.
    ///
    /// # Examples
    /// ```
    /// use workout_planner::domain::RegistrationDetails;
    ///
    /// let details =
    ///     RegistrationDetails::try_from_parts("alice", "Alice@Example.com", "pw").unwrap();
    /// assert_eq!(details.email().as_ref(), "alice@example.com");
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Opaque one-way password verifier (a PHC string).
///
/// The `Debug` output is redacted so verifiers never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordVerifier(String);

impl PasswordVerifier {
    /// Wrap an encoded verifier produced by a credential hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded verifier for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordVerifier(<redacted>)")
    }
}

/// Result of a registration attempt.
///
/// Collisions are reported independently so a client can tell the user
/// which field to change. `created` is true only when neither collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    pub username_taken: bool,
    pub email_taken: bool,
    pub created: bool,
}

impl RegistrationOutcome {
    /// Outcome for a successful insert.
    pub fn created() -> Self {
        Self {
            username_taken: false,
            email_taken: false,
            created: true,
        }
    }

    /// Outcome for a rejected registration.
    pub fn rejected(username_taken: bool, email_taken: bool) -> Self {
        Self {
            username_taken,
            email_taken,
            created: false,
        }
    }
}

/// Result of a credential check.
///
/// An unknown user short-circuits to `found = false, verified = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub found: bool,
    pub verified: bool,
}

impl VerificationOutcome {
    pub fn unknown_user() -> Self {
        Self {
            found: false,
            verified: false,
        }
    }

    pub fn checked(verified: bool) -> Self {
        Self {
            found: true,
            verified,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  alice  ", "secret")]
    #[case("bob", " padded password ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("x", "a@b.c", "pw", "username")]
    #[case("alice", "nope", "pw", "email")]
    #[case("alice", "a@b.c", "", "password")]
    fn registration_reports_offending_field(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = RegistrationDetails::try_from_parts(username, email, password)
            .expect_err("invalid registration");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn verifier_debug_is_redacted() {
        let verifier = PasswordVerifier::new("$argon2id$v=19$secret");
        assert!(!format!("{verifier:?}").contains("secret"));
        assert_eq!(verifier.as_str(), "$argon2id$v=19$secret");
    }

    #[rstest]
    fn outcomes_serialise_camel_case() {
        let value =
            serde_json::to_value(RegistrationOutcome::rejected(true, false)).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({ "usernameTaken": true, "emailTaken": false, "created": false })
        );
    }
}
