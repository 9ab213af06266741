//! HS256 JSON Web Token implementation of [`AccessTokenService`].
//!
//! Claims are `{userId, iat, exp}` with a one hour lifetime. Expiry is
//! checked against the injected clock rather than the system time so tests
//! can move time forward.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TokenSecret;
use crate::domain::ports::{AccessTokenError, AccessTokenService};
use crate::domain::{AccessToken, UserId};

/// Token lifetime in seconds.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: Uuid,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service signing with `secret` and reading time from `clock`.
    #[must_use]
    pub fn new(secret: &TokenSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService").finish_non_exhaustive()
    }
}

impl AccessTokenService for JwtTokenService {
    fn issue(&self, user: &UserId) -> Result<AccessToken, AccessTokenError> {
        let iat = self.clock.utc().timestamp();
        let claims = Claims {
            user_id: *user.as_uuid(),
            iat,
            exp: iat.saturating_add(ACCESS_TOKEN_TTL_SECS),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| AccessTokenError::issue(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, AccessTokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| AccessTokenError::invalid(err.to_string()))?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(AccessTokenError::invalid("token expired"));
        }
        Ok(UserId::from_uuid(data.claims.user_id))
    }
}
