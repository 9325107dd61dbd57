//! User business logic service.
//!
//! Handles listing and removal of registered users

use crate::api::common::PaginationFilter;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::AccountStore;
use validator::Validate;

pub struct UserService<S: AccountStore> {
    store: S,
}

impl<S: AccountStore> UserService<S> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `store` - Account store backing the service
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists one page of users together with the total user count.
    pub async fn list_users(&self, pagination: &PaginationFilter) -> ServiceResult<(Vec<User>, u64)> {
        pagination
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let users = self.store.list(pagination).await?;
        let total = self.store.count().await?;
        Ok((users, total))
    }

    /// Deletes a user by ID.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no user had this ID
    pub async fn delete_user(&self, id: i64) -> ServiceResult<()> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::not_found("User", id.to_string()));
        }

        tracing::info!("Deleted user id {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::database::test_pool;
    use crate::repositories::user_repository::UserRepository;

    async fn seed(repo: &UserRepository<'_>, username: &str) -> User {
        repo.insert(NewUser {
            username: username.to_string(),
            password_hash: "$2b$04$placeholder".to_string(),
            email: format!("{username}@x.com"),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_users_with_total() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        seed(&repo, "alice").await;
        seed(&repo, "bob").await;
        seed(&repo, "carol").await;

        let service = UserService::new(UserRepository::new(&pool));
        let (users, total) = service
            .list_users(&PaginationFilter {
                page: Some(1),
                per_page: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_list_users_rejects_bad_pagination() {
        let pool = test_pool().await;
        let service = UserService::new(UserRepository::new(&pool));

        let err = service
            .list_users(&PaginationFilter {
                page: Some(0),
                per_page: Some(500),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let alice = seed(&repo, "alice").await;

        let service = UserService::new(UserRepository::new(&pool));
        service.delete_user(alice.id).await.unwrap();

        assert!(repo.find_by_id(alice.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let pool = test_pool().await;
        let service = UserService::new(UserRepository::new(&pool));

        let err = service.delete_user(9999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
