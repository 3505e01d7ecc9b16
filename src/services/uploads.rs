//! Upload storage for equipment images

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
};

/// Stores uploaded images on the local filesystem and hands out the
/// web-relative paths kept in the database.
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
    placeholder: String,
}

impl UploadStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            placeholder: config.placeholder.clone(),
        }
    }

    /// Image path used when no file is attached on creation
    pub fn placeholder(&self) -> String {
        self.placeholder.clone()
    }

    /// Directory served under /uploads
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store an uploaded file under a unique name, returning the relative
    /// path to persist. The original name is reduced to its final component
    /// so client-supplied paths cannot escape the uploads directory.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let base = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image");
        let file_name = format!("{}_{}", Uuid::new_v4().simple(), base);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to create uploads dir: {}", e)))?;
        let target = self.dir.join(&file_name);
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to write {}: {}", target.display(), e)))?;

        Ok(format!("uploads/{}", file_name))
    }

    /// Best-effort removal of a stored image. A missing or undeletable file
    /// is logged, never surfaced: the DB row is already gone.
    pub async fn remove(&self, stored_path: &str) {
        if stored_path.is_empty() || stored_path == self.placeholder {
            return;
        }
        let Some(file_name) = Path::new(stored_path).file_name() else {
            return;
        };
        let target = self.dir.join(file_name);
        if let Err(e) = tokio::fs::remove_file(&target).await {
            tracing::warn!("Failed to remove image {}: {}", target.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> UploadStore {
        let dir = std::env::temp_dir().join(format!("agribook-uploads-{}", Uuid::new_v4()));
        UploadStore::new(&UploadsConfig {
            dir: dir.to_string_lossy().into_owned(),
            placeholder: "uploads/placeholder.png".to_string(),
        })
    }

    #[tokio::test]
    async fn save_then_remove_round_trip() {
        let store = temp_store();
        let stored = store.save("tractor.png", b"not-really-a-png").await.unwrap();
        assert!(stored.starts_with("uploads/"));
        assert!(stored.ends_with("_tractor.png"));

        let on_disk = store.dir().join(Path::new(&stored).file_name().unwrap());
        assert!(on_disk.exists());

        store.remove(&stored).await;
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn save_strips_directory_components() {
        let store = temp_store();
        let stored = store.save("../../etc/passwd", b"data").await.unwrap();
        assert!(stored.ends_with("_passwd"));
        assert!(!stored.contains(".."));
    }

    #[tokio::test]
    async fn removing_a_missing_file_does_not_panic() {
        let store = temp_store();
        store.remove("uploads/never-existed.png").await;
    }

    #[tokio::test]
    async fn placeholder_is_never_removed() {
        let store = temp_store();
        // No file is touched; this must simply return.
        store.remove(&store.placeholder()).await;
    }
}
