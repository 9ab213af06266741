//! Truncated SHA-256 fingerprints of the token secret.
//!
//! Logged at startup so operators can tell which secret is active without
//! exposing it.

use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 digest of `secret`, as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use backend::outbound::security::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"correct horse battery staple");
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    let prefix: Vec<u8> = digest.iter().copied().take(FINGERPRINT_BYTES).collect();
    hex::encode(prefix)
}
