//! Credential and bearer token adapters.
//!
//! - [`Argon2PasswordHasher`] implements the password hashing port.
//! - [`JwtTokenService`] implements the access token port with HS256.
//! - [`token_secret_from_env`] loads the shared signing secret.

mod argon2_password_hasher;
mod jwt_token_service;
pub mod token_secret;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_service::{ACCESS_TOKEN_TTL_SECS, JwtTokenService};
pub use token_secret::{
    BuildMode, TOKEN_SECRET_MIN_LEN, TokenSecret, TokenSecretError, secret_fingerprint,
    token_secret_from_env, token_secret_from_process,
};
