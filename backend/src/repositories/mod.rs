//! Persistence layer for user accounts.
//!
//! Services depend on the [`AccountStore`] trait rather than on SQL directly;
//! [`user_repository::UserRepository`] is the SQLite implementation.

use crate::{
    api::common::PaginationFilter,
    database::models::{NewUser, User},
};
use anyhow::Result;
use async_trait::async_trait;

pub mod user_repository;

/// Read and write access to stored user records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// `Some(User)` if a user with this username exists.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// `Some(User)` if a user with this id exists.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Inserts a user and returns the stored row.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Deletes a user. Returns `false` when no row had this id.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// One page of users, oldest first.
    async fn list(&self, pagination: &PaginationFilter) -> Result<Vec<User>>;

    async fn count(&self) -> Result<u64>;

    async fn username_exists(&self, username: &str) -> Result<bool>;

    async fn email_exists(&self, email: &str) -> Result<bool>;
}

/// Column named by a UNIQUE constraint failure, or `None` for any other error.
///
/// SQLite reports these as `UNIQUE constraint failed: users.email`.
pub fn unique_violation_column(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
            let column = db_error.message().rsplit('.').next().unwrap_or_default();
            Some(column.trim().to_string())
        }
        _ => None,
    }
}
