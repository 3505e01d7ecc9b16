//! AgriBook Equipment Rental Server
//!
//! A Rust REST API server for managing agricultural equipment rentals:
//! catalog categories, rentable equipment, customer bookings, and users.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
