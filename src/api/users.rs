//! User management endpoints (admin only)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::user::{UpdateUser, User},
};

use super::{ApiResponse, AuthenticatedUser};

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = Vec<User>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    claims.require_admin()?;
    let users = state.services.users.list().await?;
    Ok(ApiResponse::success("Users retrieved", users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    claims.require_admin()?;
    let user = state.services.users.get_by_id(id).await?;
    Ok(ApiResponse::success("User retrieved", user))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateUser>,
) -> AppResult<Json<ApiResponse<User>>> {
    claims.require_admin()?;
    let user = state.services.users.update(id, data).await?;
    Ok(ApiResponse::success("User updated successfully", user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.require_admin()?;
    state.services.users.delete(id).await?;
    Ok(ApiResponse::message_only("User deleted successfully"))
}
