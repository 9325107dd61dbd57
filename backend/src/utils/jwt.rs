//! JWT token utilities for authentication and authorization.
//!
//! Access tokens are compact HS256 JWTs carrying the username, issue time and
//! expiry. They are stateless: a token is valid exactly when its signature
//! checks out against the server secret and its expiry lies in the future.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::auth::errors::{AuthError, AuthResult};

/// The only signing algorithm accepted on either side.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT Claims structure carried by every access token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the authenticated user
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Check if token has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Signs access tokens with the server secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    has_secret: bool,
    expires_in_seconds: u64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            has_secret: !secret.is_empty(),
            expires_in_seconds,
        }
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn expires_in(&self) -> u64 {
        self.expires_in_seconds
    }

    /// Issue a token for `username`, valid from now.
    pub fn issue(&self, username: &str) -> AuthResult<String> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> AuthResult<String> {
        if !self.has_secret {
            return Err(AuthError::Signing("signing secret is empty".to_string()));
        }

        let expires_at = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::Signing(format!(
                    "token lifetime of {} seconds is out of range",
                    self.expires_in_seconds
                ))
            })?;

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

/// Checks signature, algorithm and expiry of presented tokens.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // Expiry is checked below against an explicit clock with no leeway.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenVerifier {
            decoding_key,
            validation,
        }
    }

    /// Validate and decode a token against the current time.
    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        self.validate_at(token, Utc::now())
    }

    /// Validate and decode a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        if token.split('.').count() != 3 {
            return Err(AuthError::MalformedToken);
        }

        // Headers naming an unknown algorithm such as "none" fail to parse here.
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        if header.alg != TOKEN_ALGORITHM {
            return Err(AuthError::InvalidSignature);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::InvalidKeyFormat => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::MalformedToken,
            })?;

        if claims.is_expired_at(now) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}
