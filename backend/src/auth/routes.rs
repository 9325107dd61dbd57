//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration and login and are open to
//! unauthenticated callers.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
