//! Bookings repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingQuery, BookingStatus, NewBooking, UpdateBooking},
};

const SELECT_WITH_NAMES: &str = r#"
    SELECT b.id, b.equipment_id, e.name AS equipment_name, c.name AS category_name,
           b.customer_id, b.customer_name, b.customer_phone, b.customer_email,
           b.start_date, b.end_date, b.total_days, b.total_price, b.status,
           b.notes, b.created_at
    FROM bookings b
    LEFT JOIN equipment e ON b.equipment_id = e.id
    LEFT JOIN categories c ON e.category_id = c.id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List bookings, newest first, with optional AND-combined filters
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("b.status = ${}", idx));
            idx += 1;
        }
        if query.customer_id.is_some() {
            conditions.push(format!("b.customer_id = ${}", idx));
            idx += 1;
        }
        if query.equipment_id.is_some() {
            conditions.push(format!("b.equipment_id = ${}", idx));
            idx += 1;
        }
        if query.start_date.is_some() {
            conditions.push(format!("b.start_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("b.end_date <= ${}", idx));
            idx += 1;
        }
        let _ = idx;

        let mut sql = SELECT_WITH_NAMES.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY b.created_at DESC");

        let mut builder = sqlx::query_as::<_, Booking>(&sql);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(customer_id) = query.customer_id {
            builder = builder.bind(customer_id);
        }
        if let Some(equipment_id) = query.equipment_id {
            builder = builder.bind(equipment_id);
        }
        if let Some(start_date) = query.start_date {
            builder = builder.bind(start_date);
        }
        if let Some(end_date) = query.end_date {
            builder = builder.bind(end_date);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        let sql = format!("{} WHERE b.id = $1", SELECT_WITH_NAMES);
        sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Create a booking with server-computed totals.
    ///
    /// Runs in a transaction holding a row lock on the equipment, so
    /// concurrent creates for the same equipment serialize and overlapping
    /// pending/confirmed bookings are rejected.
    pub async fn create(
        &self,
        data: &NewBooking,
        total_days: i32,
        total_price: f64,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let equipment: Option<i32> =
            sqlx::query_scalar("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
                .bind(data.equipment_id)
                .fetch_optional(&mut *tx)
                .await?;
        if equipment.is_none() {
            return Err(AppError::NotFound(format!(
                "Equipment {} not found",
                data.equipment_id
            )));
        }

        // Half-open ranges [start, end) overlap iff both starts precede the
        // other's end.
        let overlapping: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE equipment_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND start_date < $3
                  AND end_date > $2
            )
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *tx)
        .await?;
        if overlapping {
            return Err(AppError::Conflict(
                "Equipment is already booked for the requested dates".to_string(),
            ));
        }

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings
                (equipment_id, customer_id, customer_name, customer_phone, customer_email,
                 start_date, end_date, total_days, total_price, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.customer_id)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(&data.customer_email)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(total_days)
        .bind(total_price)
        .bind(data.status)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Update a booking; recomputed totals are passed in by the service when
    /// either date changed.
    ///
    /// Date changes and transitions into a blocking status re-run the overlap
    /// check against sibling bookings, under the same equipment row lock as
    /// `create`, so a booking cannot be moved or revived onto an occupied
    /// range.
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateBooking,
        totals: Option<(i32, f64)>,
    ) -> AppResult<Booking> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.customer_name, "customer_name");
        add_field!(data.customer_phone, "customer_phone");
        add_field!(data.customer_email, "customer_email");
        add_field!(data.start_date, "start_date");
        add_field!(data.end_date, "end_date");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");
        if totals.is_some() {
            sets.push(format!("total_days = ${}", idx));
            idx += 1;
            sets.push(format!("total_price = ${}", idx));
            idx += 1;
        }

        let _ = idx;
        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut tx = self.pool.begin().await?;

        let current: Option<(i32, NaiveDate, NaiveDate, BookingStatus)> = sqlx::query_as(
            "SELECT equipment_id, start_date, end_date, status FROM bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((equipment_id, current_start, current_end, current_status)) = current else {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        };

        let start = data.start_date.unwrap_or(current_start);
        let end = data.end_date.unwrap_or(current_end);
        let effective_status = data.status.unwrap_or(current_status);

        // A date move of a blocking booking, or a transition back into a
        // blocking status, must not land on a range held by another
        // pending/confirmed booking.
        let touches_calendar = data.start_date.is_some()
            || data.end_date.is_some()
            || (data.status.is_some() && !current_status.blocks_equipment());
        if effective_status.blocks_equipment() && touches_calendar {
            sqlx::query_scalar::<_, i32>("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
                .bind(equipment_id)
                .fetch_optional(&mut *tx)
                .await?;

            let overlapping: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM bookings
                    WHERE equipment_id = $1
                      AND id != $2
                      AND status IN ('pending', 'confirmed')
                      AND start_date < $4
                      AND end_date > $3
                )
                "#,
            )
            .bind(equipment_id)
            .bind(id)
            .bind(start)
            .bind(end)
            .fetch_one(&mut *tx)
            .await?;
            if overlapping {
                return Err(AppError::Conflict(
                    "Equipment is already booked for the requested dates".to_string(),
                ));
            }
        }

        let query = format!("UPDATE bookings SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.customer_name);
        bind_field!(data.customer_phone);
        bind_field!(data.customer_email);
        bind_field!(data.start_date);
        bind_field!(data.end_date);
        bind_field!(data.status);
        bind_field!(data.notes);
        if let Some((total_days, total_price)) = totals {
            builder = builder.bind(total_days).bind(total_price);
        }

        builder.execute(&mut *tx).await?;
        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Delete booking
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        }
        Ok(())
    }

    /// Count bookings, optionally restricted to one status (for stats)
    pub async fn count(&self, status: Option<&str>) -> AppResult<i64> {
        let count: i64 = if let Some(status) = status {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
                .fetch_one(&self.pool)
                .await?
        };
        Ok(count)
    }

    /// Sum of booking prices excluding cancelled bookings (for stats)
    pub async fn total_revenue(&self) -> AppResult<f64> {
        let revenue: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_price), 0)::double precision FROM bookings WHERE status != 'cancelled'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(revenue)
    }
}
