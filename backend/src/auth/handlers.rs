//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration and login,
//! parse request data and interact with the `auth::service` for core business
//! logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<UserResponse>>), (StatusCode, String)> {
    let auth_service = AuthService::new(
        UserRepository::new(&state.pool),
        state.hasher,
        &state.issuer,
    );

    match auth_service.register(payload).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(
                UserResponse::from(user),
                "User registered successfully",
            )),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, (StatusCode, String)> {
    let auth_service = AuthService::new(
        UserRepository::new(&state.pool),
        state.hasher,
        &state.issuer,
    );

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "Login successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
