// Password hashing and verification service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt.
    /// The result is a PHC-format string carrying the salt and parameters.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashError)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = PasswordService::hash_password("p@ss1").unwrap();

        assert!(PasswordService::verify_password("p@ss1", &hash).unwrap());
        assert!(!PasswordService::verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_never_plaintext() {
        let hash = PasswordService::hash_password("hunter2").unwrap();

        assert!(!hash.contains("hunter2"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_salting_produces_distinct_hashes() {
        let first = PasswordService::hash_password("same-password").unwrap();
        let second = PasswordService::hash_password("same-password").unwrap();

        // Fresh salt per call means equal passwords never share a hash
        assert_ne!(first, second);
        assert!(PasswordService::verify_password("same-password", &first).unwrap());
        assert!(PasswordService::verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let result = PasswordService::verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::PasswordHashError)));
    }
}
