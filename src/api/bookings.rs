//! Booking API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingQuery, CreateBooking, UpdateBooking},
};

use super::{ApiResponse, AuthenticatedUser};

/// List bookings with optional filters. Customers only see their own
/// bookings; admins see everything.
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Booking list", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(mut query): Query<BookingQuery>,
) -> AppResult<Json<ApiResponse<Vec<Booking>>>> {
    if !claims.is_admin() {
        query.customer_id = Some(claims.user_id);
    }
    let bookings = state.services.bookings.list(&query).await?;
    Ok(ApiResponse::success("Bookings retrieved", bookings))
}

/// Get booking by ID (admin or the booking's customer)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = state.services.bookings.get_by_id(id).await?;
    if !claims.is_admin() && booking.customer_id != Some(claims.user_id) {
        return Err(AppError::Authorization(
            "Cannot access another customer's booking".to_string(),
        ));
    }
    Ok(ApiResponse::success("Booking retrieved", booking))
}

/// Create a booking. Duration and price are computed server-side from the
/// equipment's stored daily rate.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Missing field or invalid date range"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment already booked for the dates")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(mut data): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    // Customers always book for themselves
    if !claims.is_admin() {
        data.customer_id = Some(claims.user_id);
    }
    let booking = state.services.bookings.create(data).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(
            format!(
                "Equipment booked for {} day{}",
                booking.total_days,
                if booking.total_days > 1 { "s" } else { "" }
            ),
            booking,
        ),
    ))
}

/// Update a booking (admin only); date changes are revalidated and repriced
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBooking>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    claims.require_admin()?;
    let booking = state.services.bookings.update(id, data).await?;
    Ok(ApiResponse::success("Booking updated successfully", booking))
}

/// Delete a booking (admin only)
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.require_admin()?;
    state.services.bookings.delete(id).await?;
    Ok(ApiResponse::message_only("Booking deleted successfully"))
}
