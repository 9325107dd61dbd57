//! Error types for credential handling and the token lifecycle.

use thiserror::Error;

/// Failures raised by the hasher, token issuer, token verifier and access gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The password hashing primitive failed, or a stored hash is not a bcrypt hash.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The password is longer than bcrypt can hash without truncating it.
    #[error("Password is too long ({0} bytes)")]
    PasswordTooLong(usize),

    /// Unknown username or wrong password. The two cases are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token is not a well-formed three-part token with the expected claims.
    #[error("Malformed token")]
    MalformedToken,

    /// The token was not signed with our key using an allowed algorithm.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token's expiry time has passed.
    #[error("Token expired")]
    ExpiredToken,

    /// A token could not be signed. Treated as a configuration failure.
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// No bearer credential was presented.
    #[error("Missing Authorization header")]
    MissingCredential,
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// True for every failure that comes out of token verification.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::ExpiredToken
        )
    }
}
