use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::{
    application::{error::ApplicationError, services::ImageStorage},
    services::error::StorageError,
};

/// Writes images into a directory that is also served under `/images`.
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    /// Creates the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        info!("Image directory ready at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        let is_plain = !file_name.is_empty()
            && file_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
            && !file_name.starts_with('.');
        if !is_plain {
            return Err(StorageError::InvalidFileName(file_name.to_string()));
        }
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<(), ApplicationError> {
        let path = self.path_for(file_name)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_writes_bytes_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path().join("images")).await.unwrap();

        storage.store("a1b2.jpg", b"\xff\xd8\xff").await.unwrap();

        let written = tokio::fs::read(storage.root().join("a1b2.jpg")).await.unwrap();
        assert_eq!(written, b"\xff\xd8\xff");
    }

    #[tokio::test]
    async fn store_refuses_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path()).await.unwrap();

        let err = storage.store("../escape.jpg", b"x").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InternalError(_)));
        assert!(!dir.path().parent().unwrap().join("escape.jpg").exists());
    }

    #[tokio::test]
    async fn store_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path().join("images")).await.unwrap();
        tokio::fs::remove_dir(storage.root()).await.unwrap();

        let err = storage.store("gone.jpg", b"x").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InternalError(_)));
    }
}
