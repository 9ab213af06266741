//! Authentication primitives: credentials, password hashes and bearer tokens.
//!
//! Inbound adapters build these from raw strings before calling a driving
//! port, so services only ever see validated input. Raw passwords are kept in
//! zeroizing buffers and never logged.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, User, UserName, UserValidationError};

/// Raw password supplied by a client.
///
/// Whitespace is preserved so credential comparisons are not surprising.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a raw password, rejecting empty input.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyPassword`] for empty input.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        if raw.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the raw password for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated signup request.
///
/// # Examples
/// ```
/// use backend::domain::SignupDetails;
///
/// let details = SignupDetails::try_from_parts("Ada", "ADA@example.com", "pw")
///     .expect("valid signup");
/// assert_eq!(details.email().as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: UserName,
    email: Email,
    password: Password,
}

impl SignupDetails {
    /// Validate raw signup fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`UserValidationError`] encountered, checking name,
    /// email and password in that order.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Display name for the new account.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised email for the new account.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Raw password to hash.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated sign-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigninCredentials {
    email: Email,
    password: Password,
}

impl SigninCredentials {
    /// Validate raw sign-in fields.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError`] for a malformed email or empty
    /// password.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Email to look the account up by.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password to verify.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// One-way salted password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`PasswordHasher`].
    ///
    /// [`PasswordHasher`]: crate::domain::ports::PasswordHasher
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// A user profile together with its password hash.
///
/// Only the credential store and its adapters see this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Public profile.
    pub user: User,
    /// Stored argon2 hash.
    pub password_hash: PasswordHash,
}

/// Signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning its text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for later requests.
    pub token: AccessToken,
    /// The signed-in user.
    pub user: User,
}
