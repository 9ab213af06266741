//! Account registration and sign-in.
//!
//! Implements [`CredentialStore`] over a [`UserRepository`], a
//! [`PasswordHasher`] and an [`AccessTokenService`]. Hashing runs on the
//! blocking pool so argon2 never stalls the request executor.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{
    AccessTokenError, AccessTokenService, CredentialStore, PasswordHasher, PasswordHasherError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    DomainError, Password, PasswordHash, Session, SigninCredentials, SignupDetails, User, UserId,
};

const DUPLICATE_EMAIL: &str = "Email is already in use";
const UNKNOWN_EMAIL: &str = "Authentication failed. User not found.";
const WRONG_PASSWORD: &str = "Authentication failed. Incorrect password.";
const USER_NOT_FOUND: &str = "User not found";

/// Credential service implementing the account driving port.
pub struct CredentialService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> Clone for CredentialService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<U, H, T> CredentialService<U, H, T> {
    /// Create a service over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> DomainError {
    match error {
        UserRepositoryError::DuplicateEmail { .. } => DomainError::invalid_request(DUPLICATE_EMAIL),
        UserRepositoryError::Connection { message } => {
            DomainError::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            DomainError::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> DomainError {
    DomainError::internal(error.to_string())
}

fn map_token_error(error: AccessTokenError) -> DomainError {
    DomainError::internal(error.to_string())
}

impl<U, H, T> CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: AccessTokenService,
{
    async fn hash_password(&self, password: Password) -> Result<PasswordHash, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| DomainError::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(
        &self,
        password: Password,
        hash: PasswordHash,
    ) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| DomainError::internal(format!("password check task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<U, H, T> CredentialStore for CredentialService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: AccessTokenService,
{
    async fn register(&self, details: SignupDetails) -> Result<User, DomainError> {
        if self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(DomainError::invalid_request(DUPLICATE_EMAIL));
        }

        let hash = self.hash_password(details.password().clone()).await?;
        let user = User {
            id: UserId::random(),
            name: details.name().clone(),
            email: details.email().clone(),
            created_at: Utc::now(),
        };
        self.users
            .insert(&user, &hash)
            .await
            .map_err(map_user_error)?;
        debug!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: SigninCredentials) -> Result<User, DomainError> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| DomainError::unauthorized(UNKNOWN_EMAIL))?;

        let matches = self
            .verify_password(credentials.password().clone(), stored.password_hash)
            .await?;
        if !matches {
            debug!(user_id = %stored.user.id, "password mismatch");
            return Err(DomainError::unauthorized(WRONG_PASSWORD));
        }
        Ok(stored.user)
    }

    async fn sign_in(&self, credentials: SigninCredentials) -> Result<Session, DomainError> {
        let user = self.authenticate(credentials).await?;
        let token = self.tokens.issue(&user.id).map_err(map_token_error)?;
        Ok(Session { token, user })
    }

    async fn get_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
