//! Handler functions for user management API endpoints.
//!
//! These functions list and remove registered users. Both sit behind the
//! bearer-token gate.

use crate::api::common::{ApiResponse, PaginationFilter, PaginationMeta, service_error_to_http};
use crate::database::models::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};

/// Lists registered users, one page at a time.
#[axum::debug_handler]
pub async fn list_users(
    Extension(state): Extension<AppState>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, (StatusCode, String)> {
    let user_service = UserService::new(UserRepository::new(&state.pool));

    let (users, total) = user_service
        .list_users(&pagination)
        .await
        .map_err(service_error_to_http)?;

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::paginated(
        users,
        PaginationMeta::from_filter(&pagination, total),
        "Users retrieved successfully",
    )))
}

/// Deletes a user by its ID.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let user_service = UserService::new(UserRepository::new(&state.pool));

    user_service.delete_user(id).await.map_err(|e| {
        tracing::warn!("Failed to delete user {}: {}", id, e);
        service_error_to_http(e)
    })?;

    Ok(Json(ApiResponse::success((), "User deleted successfully")))
}
