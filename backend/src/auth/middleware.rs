//! Middleware for protecting authenticated routes.
//!
//! Requests to guarded routes must carry `Authorization: Bearer <token>` with a
//! token that passes [`TokenVerifier::validate`]. Rejections are always 401 and
//! never say which check failed.

use crate::api::common::auth_error_to_http;
use crate::auth::errors::{AuthError, AuthResult};
use crate::utils::jwt::{Claims, TokenVerifier};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

/// Checks the bearer token in `headers`.
///
/// Missing header yields `MissingCredential`; anything else that is not a
/// valid bearer token yields the verifier's error.
pub fn authorize(headers: &HeaderMap, verifier: &TokenVerifier) -> AuthResult<Claims> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedToken)?;

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedToken)?;

    verifier.validate(token)
}

/// JWT authentication middleware
///
/// The request is forwarded unchanged when the token is valid.
pub async fn require_valid_token(
    State(verifier): State<Arc<TokenVerifier>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match authorize(request.headers(), &verifier) {
        Ok(claims) => {
            tracing::debug!(
                "Access granted to {} {} for {}",
                request.method(),
                request.uri().path(),
                claims.username()
            );
            Ok(next.run(request).await)
        }
        Err(error) => {
            if error.is_token_rejection() {
                tracing::warn!(
                    "Access denied to {} {}: {}",
                    request.method(),
                    request.uri().path(),
                    error
                );
            } else {
                tracing::debug!(
                    "Access denied to {} {}: {}",
                    request.method(),
                    request.uri().path(),
                    error
                );
            }
            Err(auth_error_to_http(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenIssuer;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};

    const SECRET: &str = "gate-test-secret";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        let verifier = TokenVerifier::new(SECRET);
        assert_eq!(
            authorize(&HeaderMap::new(), &verifier),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn test_valid_bearer_token() {
        let token = TokenIssuer::new(SECRET, 3600).issue("alice").unwrap();
        let verifier = TokenVerifier::new(SECRET);

        let claims = authorize(&headers_with(&format!("Bearer {token}")), &verifier).unwrap();
        assert_eq!(claims.username(), "alice");
    }

    #[test]
    fn test_missing_bearer_prefix_rejected() {
        let token = TokenIssuer::new(SECRET, 3600).issue("alice").unwrap();
        let verifier = TokenVerifier::new(SECRET);

        let err = authorize(&headers_with(&token), &verifier).unwrap_err();
        assert!(err.is_token_rejection());
    }

    #[test]
    fn test_garbage_and_expired_rejected() {
        let verifier = TokenVerifier::new(SECRET);

        let err = authorize(&headers_with("Bearer garbage"), &verifier).unwrap_err();
        assert!(err.is_token_rejection());

        let stale = TokenIssuer::new(SECRET, 24 * 3600)
            .issue_at("alice", Utc::now() - Duration::hours(25))
            .unwrap();
        let err = authorize(&headers_with(&format!("Bearer {stale}")), &verifier).unwrap_err();
        assert_eq!(err, AuthError::ExpiredToken);
    }
}
