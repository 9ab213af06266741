//! Port abstraction for community persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Community, CommunityId, CommunityView, Member, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by community repository adapters.
    pub enum CommunityRepositoryError {
        /// Repository connection could not be established.
        Connection {
            /// Adapter-supplied detail.
            message: String,
        } => "community repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-supplied detail.
            message: String,
        } => "community repository query failed: {message}",
        /// Another community already uses the slug.
        DuplicateSlug {
            /// The slug already taken.
            slug: String,
        } => "slug already in use: {slug}",
        /// The owner referenced by the community does not exist.
        OwnerMissing => "community owner does not exist",
    }
}

/// Storage for communities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Insert `community` and its owner membership as one atomic unit.
    ///
    /// Either both rows are stored or neither is.
    async fn create_with_owner(
        &self,
        community: &Community,
        owner_membership: &Member,
    ) -> Result<(), CommunityRepositoryError>;

    /// Fetch a community by identifier.
    async fn find_by_id(
        &self,
        id: &CommunityId,
    ) -> Result<Option<Community>, CommunityRepositoryError>;

    /// List all communities in creation order with owners resolved.
    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError>;

    /// List communities owned by `owner` in creation order.
    async fn list_owned_by(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError>;

    /// List distinct communities in which `user` holds a membership.
    async fn list_member_of(
        &self,
        user: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError>;
}
