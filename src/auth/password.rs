//! Password hashing.
//!
//! Argon2id with a per-hash random salt. The stored PHC string carries its
//! own parameters, so verification keeps working if the cost is retuned.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Memory cost in KiB (64 MB).
const MEMORY_COST: u32 = 65536;
/// Iterations.
const TIME_COST: u32 = 3;
/// Lanes.
const PARALLELISM: u32 = 4;

/// Password hashing errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The hasher rejected its parameters or input.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// A stored hash is not a valid PHC string.
    #[error("invalid password hash format")]
    InvalidHash,
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, None)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password into a PHC string.
///
/// # Examples
///
/// ```
/// use forum::hash_password;
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash.
///
/// An unparseable hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Check that a password length is within bounds.
pub fn password_length_ok(password: &str) -> bool {
    (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = hash_password("same_password").unwrap();
        let b = hash_password("same_password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify() {
        let hash = hash_password("correct_password").unwrap();
        assert!(verify_password("correct_password", &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(!verify_password("anything", "not_a_valid_hash"));
    }

    #[test]
    fn test_unicode_password() {
        let hash = hash_password("パスワード123").unwrap();
        assert!(verify_password("パスワード123", &hash));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(!password_length_ok("1234567"));
        assert!(password_length_ok("12345678"));
        assert!(password_length_ok(&"a".repeat(128)));
        assert!(!password_length_ok(&"a".repeat(129)));
    }
}
