//! Domain models and request/response types

pub mod booking;
pub mod category;
pub mod equipment;
pub mod user;

use crate::error::{AppError, AppResult};

/// Presence check: the field must be provided and non-blank.
pub(crate) fn require_field(value: Option<String>, field: &'static str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField(field)),
    }
}
