//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain types;
//! no business rules live here. Connections come from a `bb8` pool through
//! `diesel-async`, and every database failure is mapped to the calling port's
//! error type.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/communities")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_community_repository;
mod diesel_error_mapping;
mod diesel_member_repository;
mod diesel_role_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_community_repository::DieselCommunityRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use diesel_role_repository::DieselRoleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
