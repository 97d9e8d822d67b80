//! Portal credential hashing with Argon2id.
//!
//! Companies may carry an optional stored credential for the borrower
//! portal; only the PHC-format hash is ever persisted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use thiserror::Error;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to hash the credential.
    #[error("failed to hash credential: {0}")]
    Hash(String),

    /// Failed to verify the credential.
    #[error("failed to verify credential: {0}")]
    Verify(String),

    /// Invalid stored hash format.
    #[error("invalid credential hash format")]
    InvalidHash,
}

/// Hashes a plaintext credential using Argon2id.
///
/// # Errors
///
/// Returns [`CredentialError::Hash`] if hashing fails.
pub fn hash_credential(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialError::Hash(err.to_string()))
}

/// Verifies a plaintext credential against a stored PHC hash.
///
/// # Errors
///
/// Returns [`CredentialError::InvalidHash`] for malformed stored hashes and
/// [`CredentialError::Verify`] for unexpected verifier failures.
pub fn verify_credential(plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(hash).map_err(|_| CredentialError::InvalidHash)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialError::Verify(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_format() {
        let hash = hash_credential("portal-secret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "portal-secret");
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_credential("portal-secret").unwrap();
        assert!(verify_credential("portal-secret", &hash).unwrap());
        assert!(!verify_credential("wrong", &hash).unwrap());
    }

    #[test]
    fn test_salted_hashes_differ() {
        let first = hash_credential("same").unwrap();
        let second = hash_credential("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_credential("anything", "not-a-hash");
        assert!(matches!(result, Err(CredentialError::InvalidHash)));
    }
}
