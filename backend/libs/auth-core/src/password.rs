//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in PHC string format with a random per-password salt.
//! Verification never reverses the hash; a mismatch is an `Ok(false)`, not
//! an error, so callers can distinguish bad credentials from broken data.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hash operation failed: {0}")]
pub struct PasswordHashError(pub String);

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(false)` when the password does not match, and an error only
/// when the stored hash itself is unusable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| PasswordHashError(format!("invalid stored hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordHashError(e.to_string())),
    }
}
