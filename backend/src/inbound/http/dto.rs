//! Response bodies placed in the `data` field of the success envelope.
//!
//! Password hashes never appear here. Users embedded in community and member
//! listings are reduced to `{id, name}`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Community, CommunityView, Member, MemberView, Role, RoleSummary, User, UserSummary,
};

/// Public user profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id.
    pub id: Uuid,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Normalised email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name.to_string(),
            email: user.email.to_string(),
            created_at: user.created_at,
        }
    }
}

/// `{id, name}` reference to a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummaryResponse {
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl From<&UserSummary> for UserSummaryResponse {
    fn from(summary: &UserSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            name: summary.name.to_string(),
        }
    }
}

/// A stored role.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    /// Role id.
    pub id: Uuid,
    /// Role name.
    #[schema(example = "member")]
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: *role.id.as_uuid(),
            name: role.name.to_string(),
            created_at: role.created_at,
        }
    }
}

/// `{id, name}` reference to a role.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleSummaryResponse {
    /// Role id.
    pub id: Uuid,
    /// Role name.
    pub name: String,
}

impl From<&RoleSummary> for RoleSummaryResponse {
    fn from(summary: &RoleSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            name: summary.name.to_string(),
        }
    }
}

/// A newly created community. `owner` is the owning user's id.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    /// Community id.
    pub id: Uuid,
    /// Display name.
    #[schema(example = "Rust Berlin")]
    pub name: String,
    /// URL-safe unique slug.
    #[schema(example = "rust-berlin")]
    pub slug: String,
    /// Owning user id.
    pub owner: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Community> for CommunityResponse {
    fn from(community: &Community) -> Self {
        Self {
            id: *community.id.as_uuid(),
            name: community.name.to_string(),
            slug: community.slug.to_string(),
            owner: *community.owner.as_uuid(),
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

/// A community in a listing, with its owner resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityListingResponse {
    /// Community id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// URL-safe unique slug.
    pub slug: String,
    /// Owning user.
    pub owner: UserSummaryResponse,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<CommunityView> for CommunityListingResponse {
    fn from(view: CommunityView) -> Self {
        let CommunityView { community, owner } = view;
        Self {
            id: *community.id.as_uuid(),
            name: community.name.to_string(),
            slug: community.slug.to_string(),
            owner: UserSummaryResponse::from(&owner),
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

/// A newly added membership, referencing user, community and role by id.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    /// Membership id.
    pub id: Uuid,
    /// Member user id.
    pub user: Uuid,
    /// Community id.
    pub community: Uuid,
    /// Role id.
    pub role: Uuid,
    /// Time the member was added.
    pub created_at: DateTime<Utc>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_uuid(),
            user: *member.user.as_uuid(),
            community: *member.community.as_uuid(),
            role: *member.role.as_uuid(),
            created_at: member.created_at,
        }
    }
}

/// A membership in a community listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberListingResponse {
    /// Membership id.
    pub id: Uuid,
    /// Community id.
    pub community: Uuid,
    /// Member user.
    pub user: UserSummaryResponse,
    /// Role held in the community.
    pub role: RoleSummaryResponse,
    /// Time the member was added.
    pub created_at: DateTime<Utc>,
}

impl From<MemberView> for MemberListingResponse {
    fn from(view: MemberView) -> Self {
        Self {
            id: *view.id.as_uuid(),
            community: *view.community.as_uuid(),
            user: UserSummaryResponse::from(&view.user),
            role: RoleSummaryResponse::from(&view.role),
            created_at: view.created_at,
        }
    }
}
