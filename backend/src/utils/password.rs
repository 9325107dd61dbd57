//! One-way password hashing backed by bcrypt.
//!
//! Every call to [`PasswordHasher::hash`] draws a fresh random salt, so the same
//! password never produces the same stored hash twice. Verification compares in
//! constant time.
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are
//! rejected with [`AuthError::PasswordTooLong`] instead of being cut short.

use crate::auth::errors::{AuthError, AuthResult};
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};

/// Lowest cost factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Hashes and verifies passwords with a fixed bcrypt cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password.
    ///
    /// # Errors
    /// Returns `AuthError::PasswordTooLong` when bcrypt cannot use the whole
    /// password, and `AuthError::Hashing` when bcrypt itself fails (invalid
    /// cost, no entropy). Weak passwords are accepted.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        non_truncating_hash(password, self.cost).map_err(|e| match e {
            BcryptError::Truncation(len) => AuthError::PasswordTooLong(len),
            other => AuthError::Hashing(other.to_string()),
        })
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `Ok(false)` when the password does not match.
    ///
    /// # Errors
    /// Returns `AuthError::PasswordTooLong` for passwords bcrypt would
    /// truncate, and `AuthError::Hashing` if `hash` was not produced by bcrypt.
    pub fn verify(&self, password: &str, hash: &str) -> AuthResult<bool> {
        non_truncating_verify(password, hash).map_err(|e| match e {
            BcryptError::Truncation(len) => AuthError::PasswordTooLong(len),
            other => AuthError::Hashing(format!("Malformed password hash: {}", other)),
        })
    }
}
