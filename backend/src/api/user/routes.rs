//! Defines the HTTP routes for user management.
//!
//! Every route here requires a valid bearer token.

use super::handlers::{delete_user, list_users};
use crate::auth::middleware::require_valid_token;
use crate::utils::jwt::TokenVerifier;
use axum::{
    Router, middleware,
    routing::{delete, get},
};
use std::sync::Arc;

pub fn user_router(verifier: Arc<TokenVerifier>) -> Router {
    Router::new()
        .route(
            "/users",
            get(list_users).layer(middleware::from_fn_with_state(
                verifier.clone(),
                require_valid_token,
            )),
        )
        .route(
            "/user/{id}",
            delete(delete_user).layer(middleware::from_fn_with_state(
                verifier,
                require_valid_token,
            )),
        )
}
