use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// Durable content store for decoded image bytes, keyed by file name.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<(), ApplicationError>;
}
