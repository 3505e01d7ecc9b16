//! Category model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::require_field;
use crate::error::AppResult;

/// Category with its read-time equipment count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Derived aggregate, never stored
    pub equipment_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated category fields ready for insertion
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategory {
    pub fn validate(self) -> AppResult<NewCategory> {
        let name = require_field(self.name, "name")?;
        Ok(NewCategory {
            name,
            description: self.description,
        })
    }
}

/// Update category request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}
