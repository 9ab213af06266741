//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with mocks and no I/O. The bearer gate reads the
//! token service from the same state.

use std::sync::Arc;

use crate::domain::ports::{
    AccessTokenService, CommunityRegistry, CommunityRepository, CredentialStore, MemberRepository,
    MembershipLedger, PasswordHasher, RoleRegistry, RoleRepository, UserRepository,
};
use crate::domain::{CommunityService, CredentialService, MembershipService, RoleService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Sign-up, sign-in and profile lookup.
    pub credentials: Arc<dyn CredentialStore>,
    /// Token verification for the bearer gate.
    pub tokens: Arc<dyn AccessTokenService>,
    /// Role registry.
    pub roles: Arc<dyn RoleRegistry>,
    /// Community registry.
    pub communities: Arc<dyn CommunityRegistry>,
    /// Membership ledger.
    pub members: Arc<dyn MembershipLedger>,
}

/// Driven adapters from which the domain services are composed.
pub struct Adapters<U, R, C, M, H, T> {
    /// User repository.
    pub users: Arc<U>,
    /// Role repository.
    pub roles: Arc<R>,
    /// Community repository.
    pub communities: Arc<C>,
    /// Member repository.
    pub members: Arc<M>,
    /// Password hasher.
    pub hasher: Arc<H>,
    /// Access token issuer and verifier.
    pub tokens: Arc<T>,
}

impl HttpState {
    /// Wire the domain services over one set of driven adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::{Adapters, HttpState};
    /// use backend::outbound::memory::MemoryStore;
    /// use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService, TokenSecret};
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let tokens = JwtTokenService::new(&TokenSecret::ephemeral(), Arc::new(DefaultClock));
    /// let state = HttpState::from_adapters(Adapters {
    ///     users: Arc::clone(&store),
    ///     roles: Arc::clone(&store),
    ///     communities: Arc::clone(&store),
    ///     members: store,
    ///     hasher: Arc::new(Argon2PasswordHasher::new()),
    ///     tokens: Arc::new(tokens),
    /// });
    /// let _roles = state.roles.clone();
    /// ```
    #[must_use]
    pub fn from_adapters<U, R, C, M, H, T>(adapters: Adapters<U, R, C, M, H, T>) -> Self
    where
        U: UserRepository + 'static,
        R: RoleRepository + 'static,
        C: CommunityRepository + 'static,
        M: MemberRepository + 'static,
        H: PasswordHasher + 'static,
        T: AccessTokenService + 'static,
    {
        let Adapters {
            users,
            roles,
            communities,
            members,
            hasher,
            tokens,
        } = adapters;
        Self {
            credentials: Arc::new(CredentialService::new(
                Arc::clone(&users),
                hasher,
                Arc::clone(&tokens),
            )),
            tokens,
            roles: Arc::new(RoleService::new(Arc::clone(&roles))),
            communities: Arc::new(CommunityService::new(
                Arc::clone(&users),
                Arc::clone(&roles),
                Arc::clone(&communities),
            )),
            members: Arc::new(MembershipService::new(users, communities, roles, members)),
        }
    }
}
