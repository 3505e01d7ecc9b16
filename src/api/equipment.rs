//! Equipment API endpoints
//!
//! Create and update accept multipart form data so an image file can ride
//! along with the text fields; all other endpoints speak JSON.

use std::str::FromStr;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    services::equipment::UploadedImage,
};

use super::{ApiResponse, AuthenticatedUser};

/// List equipment, optionally filtered by categoryId and status
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<ApiResponse<Vec<Equipment>>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(ApiResponse::success("Equipment retrieved", equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Equipment>>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(ApiResponse::success("Equipment retrieved", equipment))
}

/// Create equipment from a multipart form (admin only)
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Missing required field"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Equipment>>)> {
    claims.require_admin()?;
    let (input, image) = read_equipment_form(multipart).await?;
    let equipment = state.services.equipment.create(input, image).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success("Equipment created successfully", equipment),
    ))
}

/// Update equipment from a multipart form (admin only)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Equipment>>> {
    claims.require_admin()?;
    let (input, image) = read_equipment_form(multipart).await?;
    let data = UpdateEquipment {
        name: input.name,
        model_number: input.model_number,
        category_id: input.category_id,
        hourly_rate: input.hourly_rate,
        daily_rate: input.daily_rate,
        description: input.description,
        status: input.status,
        image: None,
    };
    let equipment = state.services.equipment.update(id, data, image).await?;
    Ok(ApiResponse::success("Equipment updated successfully", equipment))
}

/// Delete equipment and its stored image (admin only)
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.require_admin()?;
    state.services.equipment.delete(id).await?;
    Ok(ApiResponse::message_only("Equipment deleted successfully"))
}

/// Collect the canonical camelCase text fields and the optional image part
/// from a multipart request. Unknown field names are ignored.
async fn read_equipment_form(
    mut multipart: Multipart,
) -> AppResult<(CreateEquipment, Option<UploadedImage>)> {
    let mut input = CreateEquipment::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {}", e)))?;
            if !bytes.is_empty() {
                image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid field {}: {}", name, e)))?;
        if text.is_empty() {
            continue;
        }

        match name.as_str() {
            "name" => input.name = Some(text),
            "modelNumber" => input.model_number = Some(text),
            "categoryId" => input.category_id = Some(parse_field(&text, "categoryId")?),
            "hourlyRate" => input.hourly_rate = Some(parse_field(&text, "hourlyRate")?),
            "dailyRate" => input.daily_rate = Some(parse_field(&text, "dailyRate")?),
            "description" => input.description = Some(text),
            "status" => input.status = Some(text.parse().map_err(AppError::Validation)?),
            _ => {}
        }
    }

    Ok((input, image))
}

fn parse_field<T: FromStr>(text: &str, field: &'static str) -> AppResult<T> {
    text.parse()
        .map_err(|_| AppError::Validation(format!("Invalid value for field: {}", field)))
}
