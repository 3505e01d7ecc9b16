//! Repository layer for database operations

pub mod bookings;
pub mod categories;
pub mod equipment;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub equipment: equipment::EquipmentRepository,
    pub bookings: bookings::BookingsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connectivity probe used by the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
