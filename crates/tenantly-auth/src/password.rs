//! Password hashing with Argon2id
//!
//! Digests are self-contained PHC strings carrying algorithm, parameters and
//! a per-call random salt, so verification needs nothing but the digest.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::error;

use crate::error::AuthError;

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// Two calls with the same plaintext produce different digests.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "failed to hash password");
            AuthError::Hash
        })?
        .to_string();

    Ok(digest)
}

/// Verify a plaintext password against a PHC digest string.
///
/// Returns `false` for a mismatch and for malformed digests; the comparison
/// inside argon2 is constant-time.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
