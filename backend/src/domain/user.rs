//! User identity model: usernames, email addresses and the following set.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::auth::PasswordVerifier;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    EmptyEmail,
    EmailTooLong { max: usize },
    MalformedEmail,
}

impl UserValidationError {
    /// Name of the offending field, used in error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername
            | Self::UsernameTooShort { .. }
            | Self::UsernameTooLong { .. }
            | Self::UsernameInvalidCharacters => "username",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::MalformedEmail => "email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::MalformedEmail => write!(f, "email must look like name@domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique, immutable user handle.
///
/// Usernames are the primary key for users, the owner key on exercises and
/// the element type of following sets. Comparison is case-sensitive.
///
/// # Examples
/// ```
/// use workout_planner::domain::Username;
///
/// let name = Username::new("  alice ").unwrap();
/// assert_eq!(name.as_ref(), "alice");
/// assert!(Username::new("a!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]. Surrounding whitespace is trimmed.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised email address.
///
/// Stored trimmed and lower-cased so the uniqueness check is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }

        let mut parts = normalised.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed || normalised.chars().any(char::is_whitespace) {
            return Err(UserValidationError::MalformedEmail);
        }

        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ordered, duplicate-free set of followed usernames.
///
/// Enumeration order is insertion order. Entries may name users that do not
/// (yet) exist; they are resolved lazily when a feed is composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowingSet(Vec<Username>);

impl FollowingSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `target` is already followed.
    pub fn contains(&self, target: &Username) -> bool {
        self.0.contains(target)
    }

    /// Append `target` unless present. Returns whether it was added.
    pub fn insert(&mut self, target: Username) -> bool {
        if self.contains(&target) {
            return false;
        }
        self.0.push(target);
        true
    }

    /// Remove `target` if present. Returns whether it was removed.
    pub fn remove(&mut self, target: &Username) -> bool {
        let before = self.0.len();
        self.0.retain(|entry| entry != target);
        self.0.len() != before
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Username> {
        self.0.iter()
    }

    /// Number of followed users.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is followed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the set, yielding usernames in insertion order.
    pub fn into_vec(self) -> Vec<Username> {
        self.0
    }
}

impl FromIterator<Username> for FollowingSet {
    fn from_iter<T: IntoIterator<Item = Username>>(iter: T) -> Self {
        let mut set = Self::new();
        for username in iter {
            set.insert(username);
        }
        set
    }
}

/// Registered user record.
///
/// ## Invariants
/// - `username` and `email` are each unique across the store.
/// - `password_verifier` is never exposed to clients, so `User` does not
///   implement `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    email: EmailAddress,
    password_verifier: PasswordVerifier,
    following: FollowingSet,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user with an empty following set.
    pub fn new(
        username: Username,
        email: EmailAddress,
        password_verifier: PasswordVerifier,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            password_verifier,
            following: FollowingSet::new(),
            created_at,
        }
    }

    /// Rehydrate a stored user, following set included.
    pub fn from_parts(
        username: Username,
        email: EmailAddress,
        password_verifier: PasswordVerifier,
        following: FollowingSet,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            password_verifier,
            following,
            created_at,
        }
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique, normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored PHC hash for login checks.
    pub fn password_verifier(&self) -> &PasswordVerifier {
        &self.password_verifier
    }

    /// Users followed, in insertion order.
    pub fn following(&self) -> &FollowingSet {
        &self.following
    }

    /// Registration time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn following_mut(&mut self) -> &mut FollowingSet {
        &mut self.following
    }
}
