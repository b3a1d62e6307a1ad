//! Password hashing and verification.
//!
//! Wraps bcrypt at its default cost. The cost keeps a single hash in the
//! hundreds-of-milliseconds range on commodity hardware, which is the
//! intended trade-off for interactive logins. Raw passwords are never
//! logged or returned from here.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a password for storage.
///
/// bcrypt generates a fresh random salt per call, so hashing the same
/// password twice yields different digests.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
}

/// Verifies a password against a stored bcrypt digest.
pub fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
    verify(password, password_hash)
        .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("secret1").unwrap();

        assert!(verify_password("secret1", &digest).unwrap());
        assert!(!verify_password("secret2", &digest).unwrap());
    }

    #[test]
    fn test_same_password_different_digests() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        // Fresh salt per call
        assert_ne!(first, second);
        assert!(verify_password("secret1", &first).unwrap());
        assert!(verify_password("secret1", &second).unwrap());
    }

    #[test]
    fn test_garbage_digest_is_an_error() {
        assert!(verify_password("secret1", "not-a-bcrypt-digest").is_err());
    }
}
