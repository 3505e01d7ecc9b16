//! Booking model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};

use super::require_field;
use crate::error::{AppError, AppResult};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a booking in this status occupies the equipment's calendar
    pub fn blocks_equipment(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversions: stored as TEXT
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Full booking record, with joined equipment and category names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: Option<String>,
    pub category_name: Option<String>,
    pub customer_id: Option<i32>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Recomputed server-side from the date range
    pub total_days: i32,
    /// Recomputed server-side from the equipment's daily rate
    pub total_price: f64,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create booking request. Client-submitted `totalDays`/`totalPrice` are
/// accepted for wire compatibility but treated as hints only; authoritative
/// values come from the rule evaluator.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub equipment_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_days: Option<i64>,
    pub total_price: Option<f64>,
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

/// Required booking fields after presence validation; dates still go through
/// the rule evaluator before persistence.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub equipment_id: i32,
    pub customer_id: Option<i32>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub notes: Option<String>,
}

impl CreateBooking {
    pub fn validate(self) -> AppResult<NewBooking> {
        let equipment_id = self
            .equipment_id
            .ok_or(AppError::MissingField("equipmentId"))?;
        let customer_name = require_field(self.customer_name, "customerName")?;
        let start_date = self.start_date.ok_or(AppError::MissingField("startDate"))?;
        let end_date = self.end_date.ok_or(AppError::MissingField("endDate"))?;

        Ok(NewBooking {
            equipment_id,
            customer_id: self.customer_id,
            customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            start_date,
            end_date,
            status: self.status.unwrap_or(BookingStatus::Pending),
            notes: self.notes,
        })
    }
}

/// Update booking request (partial). Changing either date triggers a full
/// revalidation and repricing of the range.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBooking {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

/// Booking list filters, combined with AND; absent keys are ignored
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    pub customer_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Keep bookings starting on or after this date
    pub start_date: Option<NaiveDate>,
    /// Keep bookings ending on or before this date
    pub end_date: Option<NaiveDate>,
}
