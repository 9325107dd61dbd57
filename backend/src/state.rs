//! Process-wide state shared by every request.
//!
//! Everything here is built once at startup from [`Config`] and only read
//! afterwards, so cloning the state per request needs no locking.

use crate::config::Config;
use crate::utils::jwt::{TokenIssuer, TokenVerifier};
use crate::utils::password::PasswordHasher;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub hasher: PasswordHasher,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            hasher: PasswordHasher::new(config.bcrypt_cost),
            issuer: Arc::new(TokenIssuer::new(
                &config.jwt_secret,
                config.jwt_expires_in_seconds,
            )),
            verifier: Arc::new(TokenVerifier::new(&config.jwt_secret)),
        }
    }
}
