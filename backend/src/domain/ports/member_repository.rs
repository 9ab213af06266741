//! Port abstraction for membership persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CommunityId, Member, MemberId, MemberView};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection {
            /// Adapter-supplied detail.
            message: String,
        } => "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-supplied detail.
            message: String,
        } => "member repository query failed: {message}",
        /// The user already belongs to the community.
        DuplicateMember => "user already belongs to the community",
        /// The user, community or role referenced by the member is missing.
        MissingReference => "member references a missing user, community, or role",
    }
}

/// Storage for membership records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a membership.
    ///
    /// Fails with [`MemberRepositoryError::DuplicateMember`] when the
    /// `(user, community)` pair already has a record.
    async fn insert(&self, member: &Member) -> Result<(), MemberRepositoryError>;

    /// Delete a membership, returning `false` when no record matched.
    async fn delete(&self, id: &MemberId) -> Result<bool, MemberRepositoryError>;

    /// List the members of `community` in creation order with user and role
    /// resolved.
    async fn list_by_community(
        &self,
        community: &CommunityId,
        page: PageRequest,
    ) -> Result<Page<MemberView>, MemberRepositoryError>;
}
