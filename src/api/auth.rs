//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterUser, User},
};

use super::ApiResponse;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response payload
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
    pub token_type: &'static str,
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many attempts")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let email = request.email.ok_or(AppError::MissingField("email"))?;
    let password = request.password.ok_or(AppError::MissingField("password"))?;

    let (token, user) = state.services.users.authenticate(&email, &password).await?;

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            user,
            token,
            token_type: "Bearer",
        },
    ))
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Missing or invalid field"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.services.users.register(request).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success("User registered successfully", user),
    ))
}
