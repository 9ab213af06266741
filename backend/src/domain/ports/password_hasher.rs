//! Port for one-way password hashing.
//!
//! Hashing is CPU bound and synchronous; callers move it off the async
//! executor.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The password could not be hashed.
        Hash {
            /// Adapter-supplied detail.
            message: String,
        } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash {
            /// Adapter-supplied detail.
            message: String,
        } => "stored password hash is malformed: {message}",
    }
}

/// Salted one-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Return whether `password` matches `hash`.
    fn verify(&self, password: &Password, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}
