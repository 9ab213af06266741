//! Driving port for account registration and authentication.
//!
//! Inbound adapters call this port to sign users up and in without knowing
//! how credentials are stored or how tokens are signed.

use async_trait::async_trait;

use crate::domain::{DomainError, Session, SigninCredentials, SignupDetails, User, UserId};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Register a new account.
    ///
    /// Fails with `400 Email is already in use` when the email is taken.
    async fn register(&self, details: SignupDetails) -> Result<User, DomainError>;

    /// Check credentials and return the matching user.
    ///
    /// Fails with `401` when the email is unknown or the password is wrong.
    async fn authenticate(&self, credentials: SigninCredentials) -> Result<User, DomainError>;

    /// Authenticate and issue a bearer token for the user.
    async fn sign_in(&self, credentials: SigninCredentials) -> Result<Session, DomainError>;

    /// Fetch a user profile.
    ///
    /// Fails with `404 User not found` when no user matches.
    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError>;
}
