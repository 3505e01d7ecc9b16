//! Category service

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create(&self, input: CreateCategory) -> AppResult<Category> {
        let new = input.validate()?;
        self.repository.categories.create(&new).await
    }

    pub async fn update(&self, id: i32, data: UpdateCategory) -> AppResult<Category> {
        self.repository.categories.update(id, &data).await
    }

    /// Delete a category; refused while equipment still references it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let category = self.repository.categories.get_by_id(id).await?;
        if category.equipment_count > 0 {
            return Err(AppError::Conflict(
                "Category still has equipment assigned".to_string(),
            ));
        }
        self.repository.categories.delete(id).await
    }
}
