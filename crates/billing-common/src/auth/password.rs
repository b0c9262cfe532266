//! Password hashing and verification
//!
//! Uses Argon2id (OWASP recommended). Hash verification compares digests in
//! constant time, which is what makes this the credential verifier for the
//! login path.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use billing_core::{AuthError, CredentialVerifier};

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::internal(format!("invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Argon2-backed credential verifier for dependency injection
#[derive(Debug, Clone, Default)]
pub struct Argon2Verifier;

impl Argon2Verifier {
    /// Create a new verifier
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, candidate: &str, verifier: &str) -> Result<bool, AuthError> {
        verify_password(candidate, verifier)
    }
}
