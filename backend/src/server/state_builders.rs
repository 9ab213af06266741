//! Builders selecting the repository adapters behind [`HttpState`].

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::warn;

use backend::inbound::http::state::{Adapters, HttpState};
use backend::outbound::memory::MemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselCommunityRepository, DieselMemberRepository, DieselRoleRepository,
    DieselUserRepository,
};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService, TokenSecret};

use super::ServerConfig;

fn diesel_state(pool: &DbPool, hasher: Argon2PasswordHasher, tokens: JwtTokenService) -> HttpState {
    HttpState::from_adapters(Adapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        roles: Arc::new(DieselRoleRepository::new(pool.clone())),
        communities: Arc::new(DieselCommunityRepository::new(pool.clone())),
        members: Arc::new(DieselMemberRepository::new(pool.clone())),
        hasher: Arc::new(hasher),
        tokens: Arc::new(tokens),
    })
}

fn memory_state(hasher: Argon2PasswordHasher, tokens: JwtTokenService) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::from_adapters(Adapters {
        users: Arc::clone(&store),
        roles: Arc::clone(&store),
        communities: Arc::clone(&store),
        members: store,
        hasher: Arc::new(hasher),
        tokens: Arc::new(tokens),
    })
}

fn token_service(secret: &TokenSecret) -> JwtTokenService {
    JwtTokenService::new(secret, Arc::new(DefaultClock))
}

/// Build HTTP state from the configured adapters.
///
/// Uses Diesel repositories when a pool is configured and the shared
/// in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Argon2PasswordHasher::new();
    let tokens = token_service(&config.token_secret);
    match &config.db_pool {
        Some(pool) => diesel_state(pool, hasher, tokens),
        None => {
            warn!("no database configured; state is kept in memory and lost on restart");
            memory_state(hasher, tokens)
        }
    }
}
