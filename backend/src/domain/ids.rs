//! Strongly typed entity identifiers.
//!
//! Every entity is keyed by a service-generated UUID v4. Each id gets its own
//! newtype so a `RoleId` can never be passed where a `UserId` is expected.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Raised when an identifier string is not a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must be a valid UUID")]
pub struct InvalidId {
    /// Entity kind the identifier was meant for.
    pub kind: &'static str,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse the textual UUID form.
            ///
            /// # Errors
            ///
            /// Returns [`InvalidId`] when `raw` is not a UUID.
            pub fn parse(raw: &str) -> Result<Self, InvalidId> {
                raw.parse()
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| InvalidId { kind: $kind })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id! {
    /// Identifier of a registered user.
    UserId => "user"
}
define_id! {
    /// Identifier of a role.
    RoleId => "role"
}
define_id! {
    /// Identifier of a community.
    CommunityId => "community"
}
define_id! {
    /// Identifier of a membership record.
    MemberId => "member"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn random_ids_are_distinct() {
        assert_ne!(UserId::random(), UserId::random());
    }

    #[rstest]
    fn parse_accepts_canonical_uuid() {
        let uuid = Uuid::new_v4();
        let parsed = CommunityId::parse(&uuid.to_string()).expect("valid id");
        assert_eq!(parsed.as_uuid(), &uuid);
        assert_eq!(parsed.to_string(), uuid.to_string());
    }

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case("not-a-uuid")]
    fn parse_rejects_malformed_text(#[case] raw: &str) {
        let err = MemberId::parse(raw).expect_err("malformed id");
        assert_eq!(err.kind, "member");
        assert_eq!(err.to_string(), "member id must be a valid UUID");
    }
}
