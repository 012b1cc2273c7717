//! One-way password hashing and verification.
//!
//! Uses Argon2id with a per-hash random salt. The algorithm is deliberately
//! slow to resist brute force; verification goes through `argon2`'s
//! constant-time comparison so timing does not correlate with how much of
//! the digest matched.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::{AuthError, AuthResult};

/// Hash a plaintext password with Argon2id and a random salt.
///
/// # Errors
///
/// * `AuthError::HashingFailure` - underlying crypto/resource error. No
///   password strength policy is enforced here.
pub fn hash_password(plaintext: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|_| AuthError::HashingFailure)?
        .to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// # Errors
///
/// * `AuthError::CredentialMismatch` - the plaintext does not correspond to
///   the hash (or the stored hash is unparseable)
pub fn verify_password(hash: &str, plaintext: &str) -> AuthResult<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::CredentialMismatch)?;

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::CredentialMismatch)
}
