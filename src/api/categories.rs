//! Category API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::category::{Category, CreateCategory, UpdateCategory},
};

use super::{ApiResponse, AuthenticatedUser};

/// List all categories with equipment counts
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Category list", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.services.categories.list().await?;
    Ok(ApiResponse::success("Categories retrieved", categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(ApiResponse::success("Category retrieved", category))
}

/// Create category (admin only)
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    claims.require_admin()?;
    let category = state.services.categories.create(data).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Category created successfully", category),
    ))
}

/// Update category (admin only)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCategory>,
) -> AppResult<Json<ApiResponse<Category>>> {
    claims.require_admin()?;
    let category = state.services.categories.update(id, data).await?;
    Ok(ApiResponse::success("Category updated successfully", category))
}

/// Delete category (admin only)
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.require_admin()?;
    state.services.categories.delete(id).await?;
    Ok(ApiResponse::message_only("Category deleted successfully"))
}
