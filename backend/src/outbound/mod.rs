//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel and bb8
//! - **memory**: mutex-guarded in-process store for development and tests
//! - **security**: Argon2 password hashing and JWT bearer tokens
//!
//! Adapters translate between domain types and infrastructure types and hold
//! no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
