//! Equipment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};

use super::require_field;
use crate::error::{AppError, AppResult};

/// Equipment availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Available,
    Maintenance,
    Unavailable,
    Booked,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Unavailable => "unavailable",
            EquipmentStatus::Booked => "booked",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(EquipmentStatus::Available),
            "maintenance" => Ok(EquipmentStatus::Maintenance),
            "unavailable" => Ok(EquipmentStatus::Unavailable),
            "booked" => Ok(EquipmentStatus::Booked),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

// SQLx conversions: stored as TEXT
impl sqlx::Type<Postgres> for EquipmentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for EquipmentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EquipmentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Full equipment record, with the joined category name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub model_number: Option<String>,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub description: String,
    /// Relative path under the uploads directory
    pub image: String,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Create equipment request, collected from multipart text fields
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    pub name: Option<String>,
    pub model_number: Option<String>,
    pub category_id: Option<i32>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub description: Option<String>,
    pub status: Option<EquipmentStatus>,
}

/// Validated equipment fields ready for insertion. `image` is filled in by
/// the service once the upload (or the placeholder) is resolved.
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub model_number: Option<String>,
    pub category_id: i32,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub description: String,
    pub status: EquipmentStatus,
}

impl CreateEquipment {
    pub fn validate(self) -> AppResult<NewEquipment> {
        let name = require_field(self.name, "name")?;
        let category_id = self
            .category_id
            .ok_or(AppError::MissingField("categoryId"))?;
        let daily_rate = self.daily_rate.ok_or(AppError::MissingField("dailyRate"))?;
        if daily_rate <= 0.0 {
            return Err(AppError::Validation(
                "dailyRate must be a positive amount".to_string(),
            ));
        }
        let description = require_field(self.description, "description")?;
        let status = self.status.ok_or(AppError::MissingField("status"))?;

        Ok(NewEquipment {
            name,
            model_number: self.model_number,
            category_id,
            hourly_rate: self.hourly_rate.unwrap_or(0.0),
            daily_rate,
            description,
            status,
        })
    }
}

/// Update equipment request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub model_number: Option<String>,
    pub category_id: Option<i32>,
    pub hourly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub description: Option<String>,
    pub status: Option<EquipmentStatus>,
    /// Set by the service when a new image was uploaded
    #[serde(skip)]
    pub image: Option<String>,
}

/// Equipment list filters, combined with AND; absent keys are ignored
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuery {
    pub category_id: Option<i32>,
    pub status: Option<EquipmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> CreateEquipment {
        CreateEquipment {
            name: Some("Compact Tractor".to_string()),
            model_number: Some("CT-440".to_string()),
            category_id: Some(3),
            hourly_rate: None,
            daily_rate: Some(150.0),
            description: Some("40hp compact tractor".to_string()),
            status: Some(EquipmentStatus::Available),
        }
    }

    #[test]
    fn missing_daily_rate_names_the_field() {
        let mut input = full_input();
        input.daily_rate = None;
        assert!(matches!(
            input.validate().unwrap_err(),
            AppError::MissingField("dailyRate")
        ));
    }

    #[test]
    fn missing_category_names_the_field() {
        let mut input = full_input();
        input.category_id = None;
        assert!(matches!(
            input.validate().unwrap_err(),
            AppError::MissingField("categoryId")
        ));
    }

    #[test]
    fn hourly_rate_defaults_to_zero() {
        let new = full_input().validate().unwrap();
        assert_eq!(new.hourly_rate, 0.0);
        assert_eq!(new.daily_rate, 150.0);
    }

    #[test]
    fn non_positive_daily_rate_is_rejected() {
        let mut input = full_input();
        input.daily_rate = Some(0.0);
        assert!(matches!(
            input.validate().unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn status_parses_all_variants() {
        for s in ["available", "maintenance", "unavailable", "booked"] {
            let status: EquipmentStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
        assert!("broken".parse::<EquipmentStatus>().is_err());
    }
}
