//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, StoredCredentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection {
            /// Adapter-supplied detail.
            message: String,
        } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-supplied detail.
            message: String,
        } => "user repository query failed: {message}",
        /// Another account already holds the email address.
        DuplicateEmail {
            /// The address already taken.
            email: String,
        } => "email already registered: {email}",
    }
}

/// Storage for user profiles and their password hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with its password hash.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError>;

    /// Fetch a user and its password hash by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;

    /// Fetch a user profile by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}
