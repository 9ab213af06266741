//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by behaviour tests. One
//! `std::sync::Mutex` serialises all access, so each port call is atomic,
//! including [`CommunityRepository::create_with_owner`]. Collections are kept
//! in insertion order, which doubles as creation order for listings.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CommunityRepository, CommunityRepositoryError, MemberRepository, MemberRepositoryError,
    RoleRepository, RoleRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Community, CommunityId, CommunityView, Email, Member, MemberId, MemberView, PasswordHash,
    Role, RoleId, RoleName, StoredCredentials, User, UserId,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredCredentials>,
    roles: Vec<Role>,
    communities: Vec<Community>,
    members: Vec<Member>,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users
            .iter()
            .map(|stored| &stored.user)
            .find(|user| user.id == *id)
    }

    fn role(&self, id: &RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == *id)
    }

    fn community(&self, id: &CommunityId) -> Option<&Community> {
        self.communities.iter().find(|community| community.id == *id)
    }

    fn has_member(&self, user: &UserId, community: &CommunityId) -> bool {
        self.members
            .iter()
            .any(|member| member.user == *user && member.community == *community)
    }

    fn community_view(&self, community: &Community) -> Option<CommunityView> {
        let owner = self.user(&community.owner)?;
        Some(CommunityView {
            community: community.clone(),
            owner: owner.summary(),
        })
    }

    fn member_view(&self, member: &Member) -> Option<MemberView> {
        Some(MemberView {
            id: member.id,
            community: member.community,
            user: self.user(&member.user)?.summary(),
            role: self.role(&member.role)?.summary(),
            created_at: member.created_at,
        })
    }

    fn community_page<'a>(
        &self,
        matching: impl Iterator<Item = &'a Community>,
        page: PageRequest,
    ) -> Page<CommunityView> {
        let views: Vec<CommunityView> = matching
            .filter_map(|community| self.community_view(community))
            .collect();
        paginate(&views, page)
    }
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    Page::new(page.slice(items), total)
}

/// Shared in-memory store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, State>, E> {
        self.state.lock().map_err(|_| poisoned(POISONED))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut state = self.lock(UserRepositoryError::query)?;
        if state
            .users
            .iter()
            .any(|stored| stored.user.email == user.email)
        {
            return Err(UserRepositoryError::duplicate_email(user.email.as_str()));
        }
        state.users.push(StoredCredentials {
            user: user.clone(),
            password_hash: password_hash.clone(),
        });
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let state = self.lock(UserRepositoryError::query)?;
        Ok(state
            .users
            .iter()
            .find(|stored| stored.user.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock(UserRepositoryError::query)?;
        Ok(state.user(id).cloned())
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn insert(&self, role: &Role) -> Result<(), RoleRepositoryError> {
        let mut state = self.lock(RoleRepositoryError::query)?;
        if state.roles.iter().any(|existing| existing.name == role.name) {
            return Err(RoleRepositoryError::duplicate_name(role.name.as_str()));
        }
        state.roles.push(role.clone());
        Ok(())
    }

    async fn ensure(&self, candidate: &Role) -> Result<Role, RoleRepositoryError> {
        let mut state = self.lock(RoleRepositoryError::query)?;
        if let Some(existing) = state
            .roles
            .iter()
            .find(|role| role.name == candidate.name)
        {
            return Ok(existing.clone());
        }
        state.roles.push(candidate.clone());
        Ok(candidate.clone())
    }

    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RoleRepositoryError> {
        let state = self.lock(RoleRepositoryError::query)?;
        Ok(state.role(id).cloned())
    }

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, RoleRepositoryError> {
        let state = self.lock(RoleRepositoryError::query)?;
        Ok(state.roles.iter().find(|role| role.name == *name).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Role>, RoleRepositoryError> {
        let state = self.lock(RoleRepositoryError::query)?;
        Ok(paginate(&state.roles, page))
    }
}

#[async_trait]
impl CommunityRepository for MemoryStore {
    async fn create_with_owner(
        &self,
        community: &Community,
        owner_membership: &Member,
    ) -> Result<(), CommunityRepositoryError> {
        let mut state = self.lock(CommunityRepositoryError::query)?;
        if state
            .communities
            .iter()
            .any(|existing| existing.slug == community.slug)
        {
            return Err(CommunityRepositoryError::duplicate_slug(
                community.slug.as_str(),
            ));
        }
        if state.user(&community.owner).is_none() || state.role(&owner_membership.role).is_none()
        {
            return Err(CommunityRepositoryError::owner_missing());
        }
        state.communities.push(community.clone());
        state.members.push(*owner_membership);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CommunityId,
    ) -> Result<Option<Community>, CommunityRepositoryError> {
        let state = self.lock(CommunityRepositoryError::query)?;
        Ok(state.community(id).cloned())
    }

    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        let state = self.lock(CommunityRepositoryError::query)?;
        Ok(state.community_page(state.communities.iter(), page))
    }

    async fn list_owned_by(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        let state = self.lock(CommunityRepositoryError::query)?;
        let owned = state
            .communities
            .iter()
            .filter(|community| community.owner == *owner);
        Ok(state.community_page(owned, page))
    }

    async fn list_member_of(
        &self,
        user: &UserId,
        page: PageRequest,
    ) -> Result<Page<CommunityView>, CommunityRepositoryError> {
        let state = self.lock(CommunityRepositoryError::query)?;
        let joined = state
            .communities
            .iter()
            .filter(|community| state.has_member(user, &community.id));
        Ok(state.community_page(joined, page))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn insert(&self, member: &Member) -> Result<(), MemberRepositoryError> {
        let mut state = self.lock(MemberRepositoryError::query)?;
        if state.has_member(&member.user, &member.community) {
            return Err(MemberRepositoryError::DuplicateMember);
        }
        if state.user(&member.user).is_none()
            || state.community(&member.community).is_none()
            || state.role(&member.role).is_none()
        {
            return Err(MemberRepositoryError::MissingReference);
        }
        state.members.push(*member);
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, MemberRepositoryError> {
        let mut state = self.lock(MemberRepositoryError::query)?;
        let before = state.members.len();
        state.members.retain(|member| member.id != *id);
        Ok(state.members.len() < before)
    }

    async fn list_by_community(
        &self,
        community: &CommunityId,
        page: PageRequest,
    ) -> Result<Page<MemberView>, MemberRepositoryError> {
        let state = self.lock(MemberRepositoryError::query)?;
        let views: Vec<MemberView> = state
            .members
            .iter()
            .filter(|member| member.community == *community)
            .filter_map(|member| state.member_view(member))
            .collect();
        Ok(paginate(&views, page))
    }
}
