//! Password hashing using Argon2id
//!
//! Passwords are stored as salted Argon2id PHC strings, never as
//! plaintext and never as a fast unsalted digest. Verification parses
//! the stored string and re-derives with the embedded salt and
//! parameters, so defaults can change without invalidating old hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{SpendbookError, SpendbookResult};

/// Hash a password into a PHC string with a fresh random salt
pub fn hash_password(password: &str) -> SpendbookResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SpendbookError::PasswordHash(format!("Hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
///
/// An unparseable stored hash verifies as false rather than erroring;
/// the caller treats it the same as a wrong password.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
