//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::{ApiResponse, AuthenticatedUser};

/// Aggregate counters for the admin dashboard
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_equipment: i64,
    pub available_equipment: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    /// Sum of non-cancelled booking prices
    pub total_revenue: f64,
    pub total_customers: i64,
    pub total_categories: i64,
}

/// Get dashboard statistics (admin only)
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<StatsResponse>>> {
    claims.require_admin()?;
    let stats = state.services.stats.get_stats().await?;
    Ok(ApiResponse::success("Statistics retrieved", stats))
}
