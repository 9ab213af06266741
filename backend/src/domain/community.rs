//! Communities and their owners.

use std::fmt;

use chrono::{DateTime, Utc};

use super::ids::{CommunityId, UserId};
use super::slug::{Slug, SlugError};
use super::user::UserSummary;

/// Maximum community name length in characters.
pub const COMMUNITY_NAME_MAX: usize = 128;

/// Validation failures for community fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommunityValidationError {
    /// The name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeds `max` characters.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// The slug failed validation.
    #[error(transparent)]
    Slug(#[from] SlugError),
}

impl CommunityValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::Slug(_) => "slug",
        }
    }
}

/// Human readable community name, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityName(String);

impl CommunityName {
    /// Validate and construct a community name.
    ///
    /// # Errors
    ///
    /// Rejects blank names and names longer than [`COMMUNITY_NAME_MAX`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CommunityValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommunityValidationError::EmptyName);
        }
        if trimmed.chars().count() > COMMUNITY_NAME_MAX {
            return Err(CommunityValidationError::NameTooLong {
                max: COMMUNITY_NAME_MAX,
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

impl fmt::Display for CommunityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated input for creating a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommunity {
    /// Display name.
    pub name: CommunityName,
    /// Unique slug.
    pub slug: Slug,
    /// Owning user.
    pub owner: UserId,
}

impl NewCommunity {
    /// Validate raw name and slug for a community owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`CommunityValidationError`] for an invalid name or slug.
    pub fn try_from_parts(
        name: &str,
        slug: &str,
        owner: UserId,
    ) -> Result<Self, CommunityValidationError> {
        Ok(Self {
            name: CommunityName::new(name)?,
            slug: Slug::new(slug)?,
            owner,
        })
    }
}

/// A stored community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    /// Community id.
    pub id: CommunityId,
    /// Display name.
    pub name: CommunityName,
    /// Unique slug.
    pub slug: Slug,
    /// Owning user.
    pub owner: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Community with its owner resolved to `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityView {
    /// The community itself.
    pub community: Community,
    /// Owner reduced to `{id, name}`.
    pub owner: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn try_from_parts_trims_name() {
        let owner = UserId::random();
        let new = NewCommunity::try_from_parts("  Rustaceans ", "rustaceans", owner)
            .expect("valid community");
        assert_eq!(new.name.as_str(), "Rustaceans");
        assert_eq!(new.slug.as_str(), "rustaceans");
        assert_eq!(new.owner, owner);
    }

    #[rstest]
    #[case("", "foo", "name")]
    #[case("Foo", "", "slug")]
    #[case("Foo", "Not A Slug", "slug")]
    fn validation_errors_name_their_field(
        #[case] name: &str,
        #[case] slug: &str,
        #[case] field: &str,
    ) {
        let err = NewCommunity::try_from_parts(name, slug, UserId::random())
            .expect_err("invalid community");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn name_length_is_bounded() {
        assert!(CommunityName::new("n".repeat(COMMUNITY_NAME_MAX)).is_ok());
        assert_eq!(
            CommunityName::new("n".repeat(COMMUNITY_NAME_MAX + 1)),
            Err(CommunityValidationError::NameTooLong {
                max: COMMUNITY_NAME_MAX
            })
        );
    }
}
