//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Every call to [`hash_password`] draws a fresh random salt, so two hashes of
//! the same plaintext never compare equal. Compare only through
//! [`verify_password`].
//!
//! When there is no stored hash to check against (unknown account), call
//! [`verify_password_dummy`] so the caller still pays for one full Argon2
//! verification and the two paths take the same time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::LazyLock;
use tracing::warn;

/// Hash of a random secret, built with the same parameters as real hashes.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    let secret = SaltString::generate(&mut OsRng);
    hash_password(secret.as_str()).unwrap_or_else(|e| {
        warn!("[PWD] Could not build dummy hash: {}", e);
        String::new()
    })
});

#[derive(Debug, thiserror::Error)]
pub enum PwdError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Hash a password using the Argon2 algorithm.
///
/// The returned PHC string embeds the algorithm, parameters, and salt.
pub fn hash_password(password: &str) -> Result<String, PwdError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PwdError::Hash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
///
/// A malformed hash is a verification failure, not an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("[PWD] Stored hash could not be parsed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Run a full verification against a fixed hash nobody knows the password of.
///
/// Always `false`.
pub fn verify_password_dummy(password: &str) -> bool {
    let _ = verify_password(password, &DUMMY_HASH);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "p@ss1";
        let hash = hash_password(password)
            .expect("Password hashing should succeed");

        assert!(verify_password(password, &hash));
        assert!(!verify_password("p@ss2", &hash));
    }

    #[test]
    fn test_same_password_hashes_differ() {
        let first = hash_password("TestPassword123!").unwrap();
        let second = hash_password("TestPassword123!").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("TestPassword123!", &first));
        assert!(verify_password("TestPassword123!", &second));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("TestPassword123!").unwrap();
        assert!(!hash.contains("TestPassword123!"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_dummy_hash_uses_real_parameters() {
        let real = hash_password("p@ss1").unwrap();
        let real_params = real.rsplitn(3, '$').nth(2).unwrap();

        assert!(DUMMY_HASH.starts_with(real_params));
        assert!(PasswordHash::new(&DUMMY_HASH).is_ok());
    }

    #[test]
    fn test_dummy_verification_never_matches() {
        assert!(!verify_password_dummy("p@ss1"));
        assert!(!verify_password_dummy(""));
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
