//! User identity model.
//!
//! Users are created on signup and never mutated or deleted. External
//! representations expose the profile only; the password hash lives beside
//! the profile in [`crate::domain::auth::StoredCredentials`].

use std::fmt;

use chrono::{DateTime, Utc};

use super::ids::UserId;

/// Maximum display name length in characters.
pub const USER_NAME_MAX: usize = 64;
/// Maximum email length in characters.
pub const EMAIL_MAX: usize = 128;

/// Validation errors for user-supplied profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeds `max` characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// The email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The email exceeds `max` characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// The email lacks a single `@` between non-empty parts.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// The password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl UserValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

/// Display name shown to other users.
///
/// Surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a display name.
    ///
    /// # Errors
    ///
    /// Rejects blank names and names longer than [`USER_NAME_MAX`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalised email address: trimmed and lowercased.
///
/// Only the shape `local@domain` is checked; deliverability is not.
///
/// # Examples
/// ```
/// use backend::domain::user::Email;
///
/// let email = Email::new("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate, normalise and construct an email address.
    ///
    /// # Errors
    ///
    /// Rejects blank, oversized or malformed addresses.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let mut parts = normalised.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None)
                if !local.is_empty()
                    && !domain.is_empty()
                    && !normalised.contains(char::is_whitespace)
        );
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: UserName,
    /// Normalised email address.
    pub email: Email,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Reduced `{id, name}` view used inside community and member payloads.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// `{id, name}` projection of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: UserName,
}
