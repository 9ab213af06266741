//! Driving port for community management.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Community, CommunityView, DomainError, NewCommunity, UserId};

/// Community use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRegistry: Send + Sync {
    /// Create a community and enrol its owner under the `owner` role.
    async fn create(&self, community: NewCommunity) -> Result<Community, DomainError>;

    /// List every community.
    async fn list(&self, page: PageRequest) -> Result<Page<CommunityView>, DomainError>;

    /// List communities owned by `owner`.
    async fn list_owned_by(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, DomainError>;

    /// List communities `user` belongs to.
    async fn list_member_of(
        &self,
        user: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, DomainError>;
}
