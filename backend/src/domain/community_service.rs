//! Community registry service.
//!
//! Creating a community also enrols its owner under the `owner` role. The
//! role is ensured first, outside the write unit, so racing first creations
//! converge on one stored role. The community row and the owner membership
//! are then written together by [`CommunityRepository::create_with_owner`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{
    CommunityRegistry, CommunityRepository, CommunityRepositoryError, RoleRepository,
    UserRepository, UserRepositoryError,
};
use crate::domain::role_service::map_role_error;
use crate::domain::{
    Community, CommunityId, CommunityView, DomainError, Member, MemberId, NewCommunity, Role,
    RoleId, RoleName, UserId,
};

const OWNER_NOT_FOUND: &str = "Owner not found";

/// Community service implementing [`CommunityRegistry`].
pub struct CommunityService<U, R, C> {
    users: Arc<U>,
    roles: Arc<R>,
    communities: Arc<C>,
}

impl<U, R, C> CommunityService<U, R, C> {
    /// Create a service over the given repositories.
    pub fn new(users: Arc<U>, roles: Arc<R>, communities: Arc<C>) -> Self {
        Self {
            users,
            roles,
            communities,
        }
    }
}

fn map_community_error(error: CommunityRepositoryError) -> DomainError {
    match error {
        CommunityRepositoryError::DuplicateSlug { .. } => {
            DomainError::invalid_request("Slug is already in use")
        }
        CommunityRepositoryError::OwnerMissing => DomainError::not_found(OWNER_NOT_FOUND),
        CommunityRepositoryError::Connection { message } => {
            DomainError::internal(format!("community repository unavailable: {message}"))
        }
        CommunityRepositoryError::Query { message } => {
            DomainError::internal(format!("community repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> DomainError {
    DomainError::internal(format!("owner lookup failed: {error}"))
}

impl<U, R, C> CommunityService<U, R, C>
where
    R: RoleRepository,
{
    async fn owner_role(&self) -> Result<Role, DomainError> {
        let candidate = Role {
            id: RoleId::random(),
            name: RoleName::owner(),
            created_at: Utc::now(),
        };
        self.roles.ensure(&candidate).await.map_err(map_role_error)
    }
}

#[async_trait]
impl<U, R, C> CommunityRegistry for CommunityService<U, R, C>
where
    U: UserRepository,
    R: RoleRepository,
    C: CommunityRepository,
{
    async fn create(&self, community: NewCommunity) -> Result<Community, DomainError> {
        let NewCommunity { name, slug, owner } = community;
        self.users
            .find_by_id(&owner)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| DomainError::not_found(OWNER_NOT_FOUND))?;

        let owner_role = self.owner_role().await?;
        let now = Utc::now();
        let community = Community {
            id: CommunityId::random(),
            name,
            slug,
            owner,
            created_at: now,
            updated_at: now,
        };
        let membership = Member {
            id: MemberId::random(),
            user: owner,
            community: community.id,
            role: owner_role.id,
            created_at: now,
        };

        self.communities
            .create_with_owner(&community, &membership)
            .await
            .map_err(map_community_error)?;
        debug!(community_id = %community.id, owner_id = %owner, "community created");
        Ok(community)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<CommunityView>, DomainError> {
        self.communities
            .list(page)
            .await
            .map_err(map_community_error)
    }

    async fn list_owned_by(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, DomainError> {
        self.communities
            .list_owned_by(owner, page)
            .await
            .map_err(map_community_error)
    }

    async fn list_member_of(
        &self,
        user: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, DomainError> {
        self.communities
            .list_member_of(user, page)
            .await
            .map_err(map_community_error)
    }
}

#[cfg(test)]
#[path = "community_service_tests.rs"]
mod tests;
