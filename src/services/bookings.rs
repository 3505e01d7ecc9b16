//! Booking service: ties the rule evaluator to persistence

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingQuery, CreateBooking, UpdateBooking},
    pricing,
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        self.repository.bookings.get_by_id(id).await
    }

    /// Create a booking. `totalDays`/`totalPrice` are always recomputed from
    /// the date range and the equipment's stored daily rate; client-submitted
    /// values are ignored.
    pub async fn create(&self, input: CreateBooking) -> AppResult<Booking> {
        let new = input.validate()?;

        let equipment = self
            .repository
            .equipment
            .get_by_id(new.equipment_id)
            .await?;

        let quote = pricing::evaluate(
            Some(new.start_date),
            Some(new.end_date),
            Utc::now().date_naive(),
            equipment.daily_rate,
        )
        .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository
            .bookings
            .create(&new, quote.total_days as i32, quote.total_price)
            .await
    }

    /// Update a booking. Changing either date revalidates the merged range
    /// and reprices the booking.
    pub async fn update(&self, id: i32, data: UpdateBooking) -> AppResult<Booking> {
        let existing = self.repository.bookings.get_by_id(id).await?;

        let totals = if data.start_date.is_some() || data.end_date.is_some() {
            let start = data.start_date.unwrap_or(existing.start_date);
            let end = data.end_date.unwrap_or(existing.end_date);

            let equipment = self
                .repository
                .equipment
                .get_by_id(existing.equipment_id)
                .await?;

            let quote = pricing::evaluate(
                Some(start),
                Some(end),
                Utc::now().date_naive(),
                equipment.daily_rate,
            )
            .map_err(|e| AppError::Validation(e.to_string()))?;

            Some((quote.total_days as i32, quote.total_price))
        } else {
            None
        };

        self.repository.bookings.update(id, &data, totals).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.bookings.delete(id).await
    }
}
