//! Argon2id implementation of the [`PasswordHasher`] port.

use argon2::{Algorithm, Argon2, Params, Version};
use argon2::password_hash::{
    self, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

const SALT_BYTES: usize = 16;

/// Hashes passwords with Argon2id and a random 16 byte salt, storing PHC
/// strings.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with the crate's default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit memory (KiB), iteration and lane costs.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Hash`] when Argon2 rejects the costs,
    /// for example a memory cost below eight blocks per lane.
    pub fn with_params(
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
    ) -> Result<Self, PasswordHasherError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; SALT_BYTES]>())
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        let phc = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(phc.to_string()))
    }

    fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(8, 1, 1).expect("valid params")
    }

    fn password(raw: &str) -> Password {
        Password::new(raw).expect("non-empty password")
    }

    #[rstest]
    fn hash_round_trips_through_verify(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&password("s3cret")).expect("hashed");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify(&password("s3cret"), &hash).expect("verified"));
        assert!(!hasher.verify(&password("wrong"), &hash).expect("verified"));
    }

    #[rstest]
    fn equal_passwords_get_distinct_salts(hasher: Argon2PasswordHasher) {
        let first = hasher.hash(&password("s3cret")).expect("hashed");
        let second = hasher.hash(&password("s3cret")).expect("hashed");

        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn malformed_hash_is_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify(&password("s3cret"), &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed");

        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }

    #[rstest]
    fn costs_travel_inside_the_phc_string(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&password("s3cret")).expect("hashed");

        assert!(hash.as_str().contains("m=8,t=1,p=1"));
        let default = Argon2PasswordHasher::new();
        assert!(default.verify(&password("s3cret"), &hash).expect("verified"));
    }

    #[rstest]
    fn invalid_costs_are_rejected() {
        let result = Argon2PasswordHasher::with_params(8, 1, 0);
        assert!(matches!(result, Err(PasswordHasherError::Hash { .. })));
    }
}
