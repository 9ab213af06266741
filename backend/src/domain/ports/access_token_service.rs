//! Port for issuing and verifying bearer tokens.

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum AccessTokenError {
        /// The token could not be signed.
        Issue {
            /// Adapter-supplied detail.
            message: String,
        } => "access token could not be issued: {message}",
        /// The token is malformed, has a bad signature, or has expired.
        Invalid {
            /// Adapter-supplied detail.
            message: String,
        } => "access token rejected: {message}",
    }
}

/// Issues and verifies bearer tokens binding a user id.
///
/// Tokens are stateless; there is no revocation.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenService: Send + Sync {
    /// Sign a token for `user` that expires after the configured lifetime.
    fn issue(&self, user: &UserId) -> Result<AccessToken, AccessTokenError>;

    /// Verify `token` and return the user id it binds.
    fn verify(&self, token: &str) -> Result<UserId, AccessTokenError>;
}
