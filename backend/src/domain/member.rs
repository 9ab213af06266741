//! Membership records linking a user to a community under a role.
//!
//! A member either exists or it does not; there is no lifecycle beyond
//! creation and explicit removal. At most one member exists per
//! `(user, community)` pair.

use chrono::{DateTime, Utc};

use super::ids::{CommunityId, MemberId, RoleId, UserId};
use super::role::RoleSummary;
use super::user::UserSummary;

/// Input for adding a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMember {
    /// User to enrol.
    pub user: UserId,
    /// Target community.
    pub community: CommunityId,
    /// Role to grant.
    pub role: RoleId,
}

/// A stored membership with references left unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// Membership id.
    pub id: MemberId,
    /// Member user.
    pub user: UserId,
    /// Community joined.
    pub community: CommunityId,
    /// Role held.
    pub role: RoleId,
    /// Time the member was added.
    pub created_at: DateTime<Utc>,
}

/// Membership with user and role resolved to `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    /// Membership id.
    pub id: MemberId,
    /// Community joined.
    pub community: CommunityId,
    /// Member user.
    pub user: UserSummary,
    /// Role held.
    pub role: RoleSummary,
    /// Time the member was added.
    pub created_at: DateTime<Utc>,
}
