//! Named roles attached to memberships.

use std::fmt;

use chrono::{DateTime, Utc};

use super::ids::RoleId;

/// Maximum role name length in characters.
pub const ROLE_NAME_MAX: usize = 64;

/// Role assigned to a community creator's own membership.
pub const OWNER_ROLE_NAME: &str = "owner";

/// Role name validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoleValidationError {
    /// The name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeds `max` characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
}

/// Globally unique role name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(String);

impl RoleName {
    /// Validate and construct a role name.
    ///
    /// # Errors
    ///
    /// Rejects blank names and names longer than [`ROLE_NAME_MAX`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RoleValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RoleValidationError::EmptyName);
        }
        if trimmed.chars().count() > ROLE_NAME_MAX {
            return Err(RoleValidationError::NameTooLong {
                max: ROLE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The built-in `owner` role name.
    #[must_use]
    pub fn owner() -> Self {
        Self(OWNER_ROLE_NAME.to_owned())
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Role id.
    pub id: RoleId,
    /// Unique name.
    pub name: RoleName,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// `{id, name}` projection used in member listings.
    #[must_use]
    pub fn summary(&self) -> RoleSummary {
        RoleSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// `{id, name}` projection of a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    /// Role id.
    pub id: RoleId,
    /// Role name.
    pub name: RoleName,
}
