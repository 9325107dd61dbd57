//! Error handling utilities for API responses.
//!
//! Provides structured responses and conversion between service-layer errors
//! and HTTP responses. Includes:
//! - Standard response envelope
//! - ServiceError / AuthError to HTTP status code mapping
//! - Pagination support for list endpoints
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//!
//! Paginated responses include:
//! - `pagination`: Metadata about current page, total items, etc.
//!
//! # Error Handling Flow
//! 1. Service layer returns domain-specific `ServiceError`
//! 2. `service_error_to_http` converts to appropriate HTTP response
//! 3. Token failures are collapsed into one generic unauthorized response

use crate::auth::errors::AuthError;
use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Message returned for every rejected token, whatever the reason.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Pagination metadata (present for paginated responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    /// Request timestamp
    pub timestamp: String,
}

/// Pagination metadata for list responses
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub current_page: u32,
    /// Number of items per page
    pub per_page: u32,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_prev: bool,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

/// Pagination parameters for requests
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PaginationFilter {
    /// Page number (1-indexed)
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    /// Number of items per page
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u32>,
}

impl PaginationMeta {
    /// Create pagination metadata from page parameters and total count
    pub fn new(current_page: u32, per_page: u32, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            ((total_items - 1) / per_page as u64 + 1) as u32
        };

        Self {
            current_page,
            per_page,
            total_items,
            total_pages,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    pub fn from_filter(filter: &PaginationFilter, total_items: u64) -> Self {
        Self::new(filter.page(), filter.per_page(), total_items)
    }
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            pagination: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a successful paginated response
    pub fn paginated(data: T, pagination: PaginationMeta, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            pagination: Some(pagination),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            pagination: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl PaginationFilter {
    /// Get page number with default
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Get per_page with default
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(20)
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> u64 {
        (self.page().saturating_sub(1) as u64) * self.per_page() as u64
    }

    /// Get limit for database queries
    pub fn limit(&self) -> u64 {
        self.per_page() as u64
    }
}

impl Default for PaginationFilter {
    fn default() -> Self {
        Self {
            page: Some(1),
            per_page: Some(20),
        }
    }
}

/// Builds the `(status, body)` pair used by every failing handler.
pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
    error_type: &str,
) -> (StatusCode, String) {
    let error_response = ApiResponse::<()>::error(message, error_type);
    let body = serde_json::to_string(&error_response)
        .unwrap_or_else(|_| error_response.message.clone());
    (status, body)
}

/// Converts AuthError to an HTTP response without revealing which check failed
pub fn auth_error_to_http(error: AuthError) -> (StatusCode, String) {
    match error {
        AuthError::MissingCredential => error_response(
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header",
            "missing_credentials",
        ),
        AuthError::InvalidCredentials => error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials",
            "invalid_credentials",
        ),
        AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::ExpiredToken => {
            error_response(StatusCode::UNAUTHORIZED, INVALID_TOKEN_MESSAGE, "invalid_token")
        }
        error @ AuthError::PasswordTooLong(_) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string(), "validation_error")
        }
        AuthError::Hashing(message) => {
            tracing::error!("Password hashing error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "hashing_error",
            )
        }
        AuthError::Signing(message) => {
            tracing::error!("Token signing error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "signing_error",
            )
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    match error {
        ServiceError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, message, "validation_error")
        }
        ServiceError::NotFound { entity, identifier } => error_response(
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity, identifier),
            "not_found",
        ),
        ServiceError::AlreadyExists { entity, identifier } => error_response(
            StatusCode::CONFLICT,
            format!("{} '{}' already exists", entity, identifier),
            "already_exists",
        ),
        ServiceError::Auth(error) => auth_error_to_http(error),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "database_error",
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "internal_error",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_pagination_meta_calculation() {
        let meta = PaginationMeta::new(2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let meta = PaginationMeta::new(3, 10, 25);
        assert!(meta.has_prev);
        assert!(!meta.has_next);

        // Test empty result set
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_pagination_filter() {
        let filter = PaginationFilter {
            page: Some(2),
            per_page: Some(50),
        };
        assert_eq!(filter.offset(), 50);
        assert_eq!(filter.limit(), 50);

        let filter = PaginationFilter {
            page: None,
            per_page: None,
        };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.per_page(), 20);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_token_errors_share_one_response() {
        let bodies: Vec<(StatusCode, String)> = [
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::ExpiredToken,
        ]
        .into_iter()
        .map(auth_error_to_http)
        .collect();

        for (status, body) in &bodies {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            let json: Value = serde_json::from_str(body).unwrap();
            assert_eq!(json["message"], INVALID_TOKEN_MESSAGE);
            assert_eq!(json["error"]["error_type"], "invalid_token");
        }
    }

    #[test]
    fn test_service_error_status_codes() {
        let cases = [
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("User", "7"), StatusCode::NOT_FOUND),
            (
                ServiceError::already_exists("User", "alice"),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Auth(AuthError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServiceError::Auth(AuthError::PasswordTooLong(80)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Auth(AuthError::Signing("empty".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::from(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let (status, _) = service_error_to_http(error);
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let (_, body) = service_error_to_http(ServiceError::from(anyhow::anyhow!("disk full")));
        assert!(!body.contains("disk full"));
    }
}
