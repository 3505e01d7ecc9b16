//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, categories, equipment, health, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AgriBook API",
        version = "1.0.0",
        description = "Agricultural Equipment Rental REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "AgriBook Team", email = "contact@agribook.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::delete_booking,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingStatus,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBooking,
            // Users
            crate::models::user::User,
            crate::models::user::UserRole,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateUser,
            // Stats
            stats::StatsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "categories", description = "Equipment category management"),
        (name = "equipment", description = "Rental equipment management"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "users", description = "User management"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
