//! Dashboard statistics service

use crate::{api::stats::StatsResponse, error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Aggregate counters for the admin dashboard
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let total_equipment = self.repository.equipment.count(None).await?;
        let available_equipment = self.repository.equipment.count(Some("available")).await?;
        let total_bookings = self.repository.bookings.count(None).await?;
        let pending_bookings = self.repository.bookings.count(Some("pending")).await?;
        let confirmed_bookings = self.repository.bookings.count(Some("confirmed")).await?;
        let completed_bookings = self.repository.bookings.count(Some("completed")).await?;
        let total_revenue = self.repository.bookings.total_revenue().await?;
        let total_customers = self.repository.users.count_customers().await?;
        let total_categories = self.repository.categories.count().await?;

        Ok(StatsResponse {
            total_equipment,
            available_equipment,
            total_bookings,
            pending_bookings,
            confirmed_bookings,
            completed_bookings,
            total_revenue,
            total_customers,
            total_categories,
        })
    }
}
