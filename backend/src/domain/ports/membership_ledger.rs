//! Driving port for membership management.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CommunityId, DomainError, Member, MemberId, MemberView, NewMember};

/// Membership use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipLedger: Send + Sync {
    /// Add a user to a community under a role.
    ///
    /// Fails with `404` when any reference is missing and `400` when the user
    /// already belongs to the community.
    async fn add(&self, member: NewMember) -> Result<Member, DomainError>;

    /// Remove a membership by id.
    async fn remove(&self, id: &MemberId) -> Result<(), DomainError>;

    /// List the members of a community.
    async fn list_by_community(
        &self,
        community: &CommunityId,
        page: PageRequest,
    ) -> Result<Page<MemberView>, DomainError>;
}
