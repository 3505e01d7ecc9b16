//! Business logic services

pub mod bookings;
pub mod categories;
pub mod equipment;
pub mod stats;
pub mod uploads;
pub mod users;

use crate::{
    config::{AuthConfig, UploadsConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub equipment: equipment::EquipmentService,
    pub bookings: bookings::BookingsService,
    pub users: users::UsersService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        uploads_config: &UploadsConfig,
    ) -> Self {
        let uploads = uploads::UploadStore::new(uploads_config);
        Self {
            categories: categories::CategoriesService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone(), uploads),
            bookings: bookings::BookingsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Database connectivity probe for readiness checks
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
