//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`AccessTokenService`])
//! are implemented by outbound adapters. Driving ports ([`CredentialStore`],
//! [`RoleRegistry`], [`CommunityRegistry`], [`MembershipLedger`]) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_service;
mod community_registry;
mod community_repository;
mod credential_store;
mod member_repository;
mod membership_ledger;
mod password_hasher;
mod role_registry;
mod role_repository;
mod user_repository;

#[cfg(test)]
pub use access_token_service::MockAccessTokenService;
pub use access_token_service::{AccessTokenError, AccessTokenService};
#[cfg(test)]
pub use community_registry::MockCommunityRegistry;
pub use community_registry::CommunityRegistry;
#[cfg(test)]
pub use community_repository::MockCommunityRepository;
pub use community_repository::{CommunityRepository, CommunityRepositoryError};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::CredentialStore;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use membership_ledger::MockMembershipLedger;
pub use membership_ledger::MembershipLedger;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use role_registry::MockRoleRegistry;
pub use role_registry::RoleRegistry;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
pub use role_repository::{RoleRepository, RoleRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
