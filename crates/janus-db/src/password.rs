//! Password credential handling
//!
//! Argon2id hashing and verification for the identity store. Hashes are PHC
//! strings with the salt embedded; verification is constant-time inside the
//! argon2 crate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DbError, DbResult};

/// Minimum password length accepted by the store
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password into a PHC string
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            DbError::Internal("password hashing failed".to_string())
        })?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string
///
/// An unparseable stored hash verifies as false rather than erroring; a
/// corrupt credential must not be distinguishable from a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Check a candidate password against the store's policy
pub fn check_policy(password: &str) -> DbResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(DbError::PasswordPolicy("password must be at least 8 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DbError::PasswordPolicy("password must contain a digit"));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(DbError::PasswordPolicy("password must contain a letter"));
    }
    Ok(())
}
