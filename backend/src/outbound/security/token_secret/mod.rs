//! Signing secret for bearer tokens, loaded from the environment.
//!
//! `TOKEN_SECRET` wins when set; otherwise the secret is read from the file
//! named by `TOKEN_SECRET_FILE` (default `/var/run/secrets/token_secret`).
//! Release builds require at least 32 bytes and refuse ephemeral secrets.
//! Debug builds fall back to a random secret only when
//! `TOKEN_ALLOW_EPHEMERAL` is truthy.

pub mod fingerprint;

use std::fmt;
use std::path::PathBuf;

use mockable::{DefaultEnv, Env};
use tracing::warn;
use zeroize::Zeroizing;

pub use fingerprint::secret_fingerprint;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
/// Minimum secret length accepted by release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const SECRET_ENV: &str = "TOKEN_SECRET";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const EPHEMERAL_LEN: usize = 64;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Ephemeral secrets may be opted into.
    Debug,
    /// Secrets must come from configuration and meet the minimum length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// HMAC key material. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw key bytes without validation.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Random secret for development runs and tests.
    #[must_use]
    pub fn ephemeral() -> Self {
        let bytes: Vec<u8> = (0..EPHEMERAL_LEN).map(|_| rand::random::<u8>()).collect();
        Self::from_bytes(bytes)
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Short SHA-256 fingerprint safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        secret_fingerprint(self.as_bytes())
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
    }
}

/// Errors raised while loading the token secret.
#[derive(Debug, thiserror::Error)]
pub enum TokenSecretError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is shorter than release builds accept.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        /// Variable or file the secret came from.
        origin: String,
        /// Length in bytes.
        length: usize,
        /// Required minimum.
        min_len: usize,
    },
    /// The configured secret has no bytes once trailing whitespace is dropped.
    #[error("token secret from {origin} is empty")]
    Empty {
        /// Variable or file the secret came from.
        origin: String,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the token secret from `env` for the given build mode.
///
/// # Errors
///
/// Returns [`TokenSecretError`] when a toggle is malformed, the secret is
/// empty or too short for a release build, or no secret is available and an
/// ephemeral one is not permitted.
///
/// # Examples
///
/// ```rust
/// use backend::outbound::security::{BuildMode, token_secret_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TOKEN_SECRET" => Some("a".repeat(32)),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret loads");
/// assert_eq!(secret.as_bytes().len(), 32);
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenSecretError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;

    if let Some(inline) = env.string(SECRET_ENV).filter(|value| !value.is_empty()) {
        return checked(TokenSecret::from_bytes(inline), SECRET_ENV, mode);
    }

    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let secret = TokenSecret::from_bytes(trim_trailing_whitespace(bytes));
            checked(secret, &path.display().to_string(), mode)
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using ephemeral token secret (dev only); tokens will not survive a restart"
            );
            Ok(TokenSecret::ephemeral())
        }
        Err(error) => Err(TokenSecretError::Read {
            path,
            source: error,
        }),
    }
}

/// Load the token secret from the process environment.
///
/// # Errors
///
/// As for [`token_secret_from_env`].
pub fn token_secret_from_process(mode: BuildMode) -> Result<TokenSecret, TokenSecretError> {
    token_secret_from_env(&DefaultEnv::new(), mode)
}

fn checked(
    secret: TokenSecret,
    origin: &str,
    mode: BuildMode,
) -> Result<TokenSecret, TokenSecretError> {
    let length = secret.as_bytes().len();
    if length == 0 {
        return Err(TokenSecretError::Empty {
            origin: origin.to_owned(),
        });
    }
    if length >= TOKEN_SECRET_MIN_LEN {
        return Ok(secret);
    }
    if mode == BuildMode::Release {
        return Err(TokenSecretError::TooShort {
            origin: origin.to_owned(),
            length,
            min_len: TOKEN_SECRET_MIN_LEN,
        });
    }
    warn!(
        origin,
        length, "token secret shorter than {TOKEN_SECRET_MIN_LEN} bytes; accepted in debug builds"
    );
    Ok(secret)
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenSecretError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match (parse_bool(&value), mode) {
        (Some(true), BuildMode::Debug) => Ok(true),
        (Some(true), BuildMode::Release) => Err(TokenSecretError::EphemeralNotAllowed),
        (Some(false), _) => Ok(false),
        (None, BuildMode::Debug) => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        (None, BuildMode::Release) => Err(TokenSecretError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn trim_trailing_whitespace(mut bytes: Vec<u8>) -> Vec<u8> {
    while bytes.last().is_some_and(u8::is_ascii_whitespace) {
        bytes.pop();
    }
    bytes
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
