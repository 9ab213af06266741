//! Membership ledger service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{
    CommunityRepository, MemberRepository, MemberRepositoryError, MembershipLedger,
    RoleRepository, UserRepository,
};
use crate::domain::{CommunityId, DomainError, Member, MemberId, MemberView, NewMember};

const MISSING_REFERENCE: &str = "User, community, or role not found";
const ALREADY_MEMBER: &str = "User is already a member of the community";
const MEMBER_NOT_FOUND: &str = "Member not found";

/// Membership service implementing [`MembershipLedger`].
pub struct MembershipService<U, C, R, M> {
    users: Arc<U>,
    communities: Arc<C>,
    roles: Arc<R>,
    members: Arc<M>,
}

impl<U, C, R, M> MembershipService<U, C, R, M> {
    /// Create a service over the given repositories.
    pub fn new(users: Arc<U>, communities: Arc<C>, roles: Arc<R>, members: Arc<M>) -> Self {
        Self {
            users,
            communities,
            roles,
            members,
        }
    }
}

fn map_member_error(error: MemberRepositoryError) -> DomainError {
    match error {
        MemberRepositoryError::DuplicateMember => DomainError::invalid_request(ALREADY_MEMBER),
        MemberRepositoryError::MissingReference => DomainError::not_found(MISSING_REFERENCE),
        MemberRepositoryError::Connection { message } => {
            DomainError::internal(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            DomainError::internal(format!("member repository error: {message}"))
        }
    }
}

fn lookup_failed(error: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("membership reference lookup failed: {error}"))
}

impl<U, C, R, M> MembershipService<U, C, R, M>
where
    U: UserRepository,
    C: CommunityRepository,
    R: RoleRepository,
{
    async fn references_exist(&self, member: &NewMember) -> Result<bool, DomainError> {
        let (user, community, role) = tokio::join!(
            self.users.find_by_id(&member.user),
            self.communities.find_by_id(&member.community),
            self.roles.find_by_id(&member.role),
        );
        Ok(user.map_err(lookup_failed)?.is_some()
            && community.map_err(lookup_failed)?.is_some()
            && role.map_err(lookup_failed)?.is_some())
    }
}

#[async_trait]
impl<U, C, R, M> MembershipLedger for MembershipService<U, C, R, M>
where
    U: UserRepository,
    C: CommunityRepository,
    R: RoleRepository,
    M: MemberRepository,
{
    async fn add(&self, member: NewMember) -> Result<Member, DomainError> {
        if !self.references_exist(&member).await? {
            return Err(DomainError::not_found(MISSING_REFERENCE));
        }

        let record = Member {
            id: MemberId::random(),
            user: member.user,
            community: member.community,
            role: member.role,
            created_at: Utc::now(),
        };
        self.members
            .insert(&record)
            .await
            .map_err(map_member_error)?;
        debug!(member_id = %record.id, community_id = %record.community, "member added");
        Ok(record)
    }

    async fn remove(&self, id: &MemberId) -> Result<(), DomainError> {
        let deleted = self.members.delete(id).await.map_err(map_member_error)?;
        if deleted {
            Ok(())
        } else {
            Err(DomainError::not_found(MEMBER_NOT_FOUND))
        }
    }

    async fn list_by_community(
        &self,
        community: &CommunityId,
        page: PageRequest,
    ) -> Result<Page<MemberView>, DomainError> {
        self.members
            .list_by_community(community, page)
            .await
            .map_err(map_member_error)
    }
}

#[cfg(test)]
#[path = "membership_service_tests.rs"]
mod tests;
