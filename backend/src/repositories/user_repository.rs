//! Database repository for user management operations.
//!
//! Provides CRUD operations for registered users

use crate::{
    api::common::PaginationFilter,
    database::models::{NewUser, User},
    repositories::AccountStore,
};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, password_hash, email, created_at, updated_at";

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for UserRepository<'_> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(user)
    }

    /// Creates a new user in the database.
    ///
    /// # Returns
    /// The newly created User with id and timestamps populated
    async fn insert(&self, user: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, email)
            VALUES (?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.email)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, pagination: &PaginationFilter) -> Result<Vec<User>> {
        let limit = pagination.limit() as i64;
        let offset = pagination.offset() as i64;

        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::repositories::unique_violation_column;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$2b$04$not-a-real-hash".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo.insert(new_user("alice", "alice@x.com")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.username, "alice");

        let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_name.email, "alice@x.com");

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        assert!(repo.find_by_username("bob").await.unwrap().is_none());
        assert!(repo.find_by_id(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_names_the_conflicting_column() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.insert(new_user("alice", "alice@x.com")).await.unwrap();
        let err = repo
            .insert(new_user("alice", "other@x.com"))
            .await
            .unwrap_err();

        assert_eq!(unique_violation_column(&err).as_deref(), Some("username"));

        let err = repo
            .insert(new_user("bob", "alice@x.com"))
            .await
            .unwrap_err();
        assert_eq!(unique_violation_column(&err).as_deref(), Some("email"));

        assert_eq!(unique_violation_column(&anyhow::anyhow!("disk full")), None);
        assert!(repo.username_exists("alice").await.unwrap());
        assert!(repo.email_exists("alice@x.com").await.unwrap());
        assert!(!repo.email_exists("other@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo.insert(new_user("alice", "alice@x.com")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_is_paginated() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        for i in 0..5 {
            repo.insert(new_user(&format!("user{i}"), &format!("user{i}@x.com")))
                .await
                .unwrap();
        }

        let page = PaginationFilter {
            page: Some(2),
            per_page: Some(2),
        };
        let users = repo.list(&page).await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();

        assert_eq!(names, vec!["user2", "user3"]);
        assert_eq!(repo.count().await.unwrap(), 5);
    }
}
