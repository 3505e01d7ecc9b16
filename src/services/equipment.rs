//! Equipment service

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::Repository,
    services::uploads::UploadStore,
};

/// An image file extracted from a multipart request
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    uploads: UploadStore,
}

impl EquipmentService {
    pub fn new(repository: Repository, uploads: UploadStore) -> Self {
        Self { repository, uploads }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Create equipment. The image is optional; without one the configured
    /// placeholder path is stored.
    pub async fn create(
        &self,
        input: CreateEquipment,
        image: Option<UploadedImage>,
    ) -> AppResult<Equipment> {
        let new = input.validate()?;

        // Resolve the category up front for a clear 404 instead of an FK
        // violation surfacing as a generic database error.
        self.repository.categories.get_by_id(new.category_id).await?;

        let image_path = match image {
            Some(upload) => self.uploads.save(&upload.file_name, &upload.bytes).await?,
            None => self.uploads.placeholder(),
        };

        self.repository.equipment.create(&new, &image_path).await
    }

    /// Update equipment; a newly uploaded image replaces the stored one
    pub async fn update(
        &self,
        id: i32,
        mut data: UpdateEquipment,
        image: Option<UploadedImage>,
    ) -> AppResult<Equipment> {
        if let Some(category_id) = data.category_id {
            self.repository.categories.get_by_id(category_id).await?;
        }

        let previous_image = if image.is_some() {
            Some(self.repository.equipment.get_by_id(id).await?.image)
        } else {
            None
        };

        if let Some(upload) = image {
            data.image = Some(self.uploads.save(&upload.file_name, &upload.bytes).await?);
        }

        let updated = self.repository.equipment.update(id, &data).await?;

        if let Some(old) = previous_image {
            self.uploads.remove(&old).await;
        }

        Ok(updated)
    }

    /// Delete equipment and best-effort remove its image file
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let image = self.repository.equipment.delete(id).await?;
        self.uploads.remove(&image).await;
        Ok(())
    }
}
