//! Credential hashing port and its Argon2 adapter.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};

use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// One-way, salted, deliberately slow password hashing.
///
/// Implementations embed the salt in the returned bytes so that `verify`
/// needs nothing but the stored hash.
pub trait CredentialHasher: Send + Sync {
    /// Hash a validated password with a fresh random salt.
    fn hash(&self, password: &Password) -> DomainResult<Vec<u8>>;

    /// Check `password` against a previously produced hash.
    ///
    /// A well-formed hash that does not match yields `Ok(false)`; a malformed
    /// hash or an internal failure yields an error.
    fn verify(&self, hash: &[u8], password: &Password) -> DomainResult<bool>;
}

/// Argon2id hasher with the crate's default cost parameters.
///
/// The stored form is the PHC string (`$argon2id$v=19$...`) as bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &Password) -> DomainResult<Vec<u8>> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string().into_bytes())
    }

    fn verify(&self, hash: &[u8], password: &Password) -> DomainResult<bool> {
        let encoded = std::str::from_utf8(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash encoding: {}", e)))?;
        let parsed = PasswordHash::new(encoded)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;

        // Argon2 compares digests in constant time
        match Self::argon2().verify_password(password.expose().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(DomainError::internal(format!("Password verify failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::new(raw).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash(&password("SecurePassword123!")).unwrap();

        assert!(hasher.verify(&hash, &password("SecurePassword123!")).unwrap());
        assert!(!hasher.verify(&hash, &password("WrongPassword123")).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = Argon2Hasher.hash(&password("password")).unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash.as_slice(), b"password");
        assert!(hash.starts_with(b"$argon2"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = Argon2Hasher::new();
        let plain = password("SamePassword123");
        let hash1 = hasher.hash(&plain).unwrap();
        let hash2 = hasher.hash(&plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(hash1, hash2);
        // But both verify correctly
        assert!(hasher.verify(&hash1, &plain).unwrap());
        assert!(hasher.verify(&hash2, &plain).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = Argon2Hasher::new();

        assert!(hasher.verify(b"not-a-phc-string", &password("password")).is_err());
        assert!(hasher.verify(&[0xff, 0xfe, 0x00], &password("password")).is_err());
    }
}
