//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Reading a row re-validates its
//! text columns through the domain constructors; a row that fails validation
//! surfaces as a [`CorruptRow`] rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Community, CommunityId, CommunityName, CommunityView, Email, Member, MemberId, MemberView,
    PasswordHash, Role, RoleId, RoleName, RoleSummary, Slug, StoredCredentials, User, UserId,
    UserName, UserSummary,
};

use super::schema::{communities, members, roles, users};

/// A stored row failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {table} row {id} is invalid: {reason}")]
pub(crate) struct CorruptRow {
    table: &'static str,
    id: Uuid,
    reason: String,
}

impl CorruptRow {
    fn new(table: &'static str, id: Uuid, reason: impl ToString) -> Self {
        Self {
            table,
            id,
            reason: reason.to_string(),
        }
    }
}

fn user_summary(id: Uuid, name: &str) -> Result<UserSummary, CorruptRow> {
    Ok(UserSummary {
        id: UserId::from_uuid(id),
        name: UserName::new(name).map_err(|err| CorruptRow::new("users", id, err))?,
    })
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, CorruptRow> {
        self.into_credentials().map(|stored| stored.user)
    }

    pub(crate) fn into_credentials(self) -> Result<StoredCredentials, CorruptRow> {
        let id = self.id;
        let user = User {
            id: UserId::from_uuid(id),
            name: UserName::new(&self.name).map_err(|err| CorruptRow::new("users", id, err))?,
            email: Email::new(&self.email).map_err(|err| CorruptRow::new("users", id, err))?,
            created_at: self.created_at,
        };
        Ok(StoredCredentials {
            user,
            password_hash: PasswordHash::new(self.password_hash),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn new(user: &'a User, password_hash: &'a PasswordHash) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name.as_str(),
            email: user.email.as_str(),
            password_hash: password_hash.as_str(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for Role {
    type Error = CorruptRow;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoleId::from_uuid(row.id),
            name: RoleName::new(&row.name).map_err(|err| CorruptRow::new("roles", row.id, err))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub(crate) struct NewRoleRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Role> for NewRoleRow<'a> {
    fn from(role: &'a Role) -> Self {
        Self {
            id: *role.id.as_uuid(),
            name: role.name.as_str(),
            created_at: role.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = communities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommunityRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CommunityRow> for Community {
    type Error = CorruptRow;

    fn try_from(row: CommunityRow) -> Result<Self, Self::Error> {
        let corrupt = |err: &dyn std::fmt::Display| CorruptRow::new("communities", row.id, err);
        Ok(Self {
            id: CommunityId::from_uuid(row.id),
            name: CommunityName::new(&row.name).map_err(|err| corrupt(&err))?,
            slug: Slug::new(&row.slug).map_err(|err| corrupt(&err))?,
            owner: UserId::from_uuid(row.owner_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A community joined with its owner's `(id, name)`.
pub(crate) type CommunityWithOwner = (CommunityRow, (Uuid, String));

pub(crate) fn community_view(
    (row, (owner_id, owner_name)): CommunityWithOwner,
) -> Result<CommunityView, CorruptRow> {
    Ok(CommunityView {
        owner: user_summary(owner_id, &owner_name)?,
        community: Community::try_from(row)?,
    })
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = communities)]
pub(crate) struct NewCommunityRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Community> for NewCommunityRow<'a> {
    fn from(community: &'a Community) -> Self {
        Self {
            id: *community.id.as_uuid(),
            name: community.name.as_str(),
            slug: community.slug.as_str(),
            owner_id: *community.owner.as_uuid(),
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: Uuid,
    pub community_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A member joined with its user's and role's `(id, name)`.
pub(crate) type MemberWithRefs = (MemberRow, (Uuid, String), (Uuid, String));

pub(crate) fn member_view(
    (row, (user_id, user_name), (role_id, role_name)): MemberWithRefs,
) -> Result<MemberView, CorruptRow> {
    Ok(MemberView {
        id: MemberId::from_uuid(row.id),
        community: CommunityId::from_uuid(row.community_id),
        user: user_summary(user_id, &user_name)?,
        role: RoleSummary {
            id: RoleId::from_uuid(role_id),
            name: RoleName::new(&role_name).map_err(|err| CorruptRow::new("roles", role_id, err))?,
        },
        created_at: row.created_at,
    })
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = members)]
pub(crate) struct NewMemberRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Member> for NewMemberRow {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_uuid(),
            user_id: *member.user.as_uuid(),
            community_id: *member.community.as_uuid(),
            role_id: *member.role.as_uuid(),
            created_at: member.created_at,
        }
    }
}
