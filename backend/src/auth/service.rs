//! Core business logic for the authentication system.

use crate::auth::errors::AuthError;
use crate::auth::models::*;
use crate::database::models::{NewUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{AccountStore, unique_violation_column};
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::PasswordHasher;
use validator::Validate;

/// Authentication service for handling registration and login
pub struct AuthService<'a, S: AccountStore> {
    store: S,
    hasher: PasswordHasher,
    issuer: &'a TokenIssuer,
}

impl<'a, S: AccountStore> AuthService<'a, S> {
    /// Create a new AuthService instance
    pub fn new(store: S, hasher: PasswordHasher, issuer: &'a TokenIssuer) -> Self {
        AuthService {
            store,
            hasher,
            issuer,
        }
    }

    /// Registers a new user, storing only the password hash.
    ///
    /// # Errors
    /// - `ServiceError::Validation` for missing or malformed fields
    /// - `ServiceError::Validation` for passwords bcrypt would truncate
    /// - `ServiceError::AlreadyExists` when the username or email is taken
    /// - `AuthError::Hashing` if the password could not be hashed
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        if self.store.username_exists(&request.username).await? {
            return Err(ServiceError::already_exists("User", &request.username));
        }
        if self.store.email_exists(&request.email).await? {
            return Err(ServiceError::already_exists("Email", &request.email));
        }

        let password_hash = match self.hash_password(request.password).await {
            Err(ServiceError::Auth(error @ AuthError::PasswordTooLong(_))) => {
                return Err(ServiceError::validation(format!("password: {}", error)));
            }
            result => result?,
        };
        let username = request.username;
        let email = request.email;

        let new_user = NewUser {
            username: username.clone(),
            password_hash,
            email: email.clone(),
        };

        match self.store.insert(new_user).await {
            Ok(user) => {
                tracing::info!("Registered user {} (id {})", user.username, user.id);
                Ok(user)
            }
            // Lost a race with a concurrent registration.
            Err(e) => match unique_violation_column(&e).as_deref() {
                Some("email") => Err(ServiceError::already_exists("Email", email)),
                Some(_) => Err(ServiceError::already_exists("User", username)),
                None => Err(e.into()),
            },
        }
    }

    /// Authenticate user and issue an access token
    ///
    /// Unknown usernames and wrong passwords both yield
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let Some(user) = self.store.find_by_username(&request.username).await? else {
            tracing::debug!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };

        // No stored hash can match a password bcrypt refuses to hash.
        let matches = match self
            .verify_password(request.password, user.password_hash)
            .await
        {
            Err(ServiceError::Auth(AuthError::PasswordTooLong(_))) => false,
            result => result?,
        };
        if !matches {
            tracing::debug!("Login rejected for user id {}: wrong password", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.issuer.issue(&user.username)?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: self.issuer.expires_in(),
        })
    }

    /// Hashes on the blocking pool so bcrypt does not stall the runtime.
    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.hasher;
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let hasher = self.hasher;
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))??;
        Ok(matches)
    }
}
