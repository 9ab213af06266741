//! Domain primitives, ports and services.
//!
//! Purpose: define the communities model (users, roles, communities and
//! members) independent of HTTP or storage. Types are immutable once built
//! and validate their invariants in constructors.
//!
//! Public surface:
//! - `DomainError` / `ErrorCode`: transport-agnostic failure taxonomy.
//! - Entities: `User`, `Role`, `Community`, `Member` and their `*View`
//!   projections.
//! - Services implementing the driving ports in [`ports`].

pub mod auth;
pub mod community;
pub mod error;
pub mod ids;
pub mod member;
pub mod ports;
pub mod role;
pub mod slug;
mod trace_id;
pub mod user;

mod community_service;
mod credential_service;
mod membership_service;
mod role_service;

pub use self::auth::{
    AccessToken, Password, PasswordHash, Session, SigninCredentials, SignupDetails,
    StoredCredentials,
};
pub use self::community::{
    Community, CommunityName, CommunityValidationError, CommunityView, NewCommunity,
};
pub use self::community_service::CommunityService;
pub use self::credential_service::CredentialService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::ids::{CommunityId, InvalidId, MemberId, RoleId, UserId};
pub use self::member::{Member, MemberView, NewMember};
pub use self::membership_service::MembershipService;
pub use self::role::{OWNER_ROLE_NAME, Role, RoleName, RoleSummary, RoleValidationError};
pub use self::role_service::RoleService;
pub use self::slug::{Slug, SlugError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, User, UserName, UserSummary, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, DomainError};
///
/// fn lookup() -> ApiResult<()> {
///     Err(DomainError::not_found("User not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, DomainError>;
