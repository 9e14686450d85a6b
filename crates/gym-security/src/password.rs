//! Admin password hashing (Argon2id, PHC strings)

use std::sync::LazyLock;

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Stored hash is malformed")]
    MalformedHash,
}

/// Verified against when a login names no stored account.
static ABSENT_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| PasswordService::hash("absent-account-placeholder").ok());

fn argon2id() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Salted Argon2id hashing. The salt and parameters travel with the
/// stored value.
pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2id()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` for a wrong password. `Err` when the stored hash cannot
    /// be parsed or verification itself fails.
    pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::MalformedHash)?;
        match argon2id().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::HashError(e.to_string())),
        }
    }

    /// Runs a full verification against a placeholder hash and reports no
    /// match, so a login for a missing account costs the same as a wrong
    /// password.
    pub fn verify_absent(password: &str) -> bool {
        if let Some(hash) = ABSENT_ACCOUNT_HASH.as_deref() {
            let _ = Self::verify(password, hash);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(PasswordService::verify("correct horse battery", &hash).unwrap());
        assert!(!PasswordService::verify("wrong horse battery", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = PasswordService::hash("same-password").unwrap();
        let b = PasswordService::hash("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash() {
        let result = PasswordService::verify("anything", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedHash)));
    }

    #[test]
    fn test_absent_account_never_matches() {
        assert!(ABSENT_ACCOUNT_HASH.is_some());
        assert!(!PasswordService::verify_absent("absent-account-placeholder"));
        assert!(!PasswordService::verify_absent(""));
    }
}
