use std::sync::{Arc, LazyLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::{error::ApplicationError, services::ImageStorage};

static DATA_URI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/[a-z]+;base64,").expect("data URI pattern is valid")
});

/// Stored assets always get this extension; the declared subtype is dropped.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Path under the public base URL where stored images are served.
pub const IMAGE_ROUTE: &str = "/images";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid image encoding: {0}")]
    InvalidImageEncoding(#[from] base64::DecodeError),

    #[error("failed to store image: {0:?}")]
    Storage(ApplicationError),
}

impl From<IngestError> for ApplicationError {
    fn from(error: IngestError) -> Self {
        ApplicationError::ImageDecodeFailed(error.to_string())
    }
}

/// Turns an uploaded base64 payload into a stored asset and its public URL.
#[derive(Clone)]
pub struct ImageIngestor {
    storage: Arc<dyn ImageStorage>,
    base_url: String,
}

impl ImageIngestor {
    pub fn new(storage: Arc<dyn ImageStorage>, base_url: impl Into<String>) -> Self {
        Self {
            storage,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn ingest(&self, payload: &str) -> Result<String, IngestError> {
        let content = decode_payload(payload)?;
        let file_name = format!("{}.{}", Uuid::new_v4(), IMAGE_EXTENSION);

        self.storage
            .store(&file_name, &content)
            .await
            .map_err(IngestError::Storage)?;

        info!("Stored image {} ({} bytes)", file_name, content.len());
        Ok(self.reference_for(&file_name))
    }

    pub fn reference_for(&self, file_name: &str) -> String {
        format!("{}{}/{}", self.base_url, IMAGE_ROUTE, file_name)
    }
}

/// Strips an optional `data:image/<subtype>;base64,` header and decodes the rest.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, IngestError> {
    let encoded: String = DATA_URI_PREFIX
        .replace(payload, "")
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD.decode(encoded.as_bytes()).map_err(|e| {
        warn!("Rejected image payload: {}", e);
        IngestError::InvalidImageEncoding(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingImageStorage, InMemoryImageStorage};

    #[test]
    fn decode_accepts_plain_base64() {
        assert_eq!(decode_payload("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn decode_strips_data_uri_header() {
        let bytes = decode_payload("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn decode_ignores_line_breaks() {
        assert_eq!(decode_payload("aGVs\nbG8=\r\n").unwrap(), b"hello");
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let err = decode_payload("not base64 at all!").unwrap_err();
        assert!(matches!(err, IngestError::InvalidImageEncoding(_)));
    }

    #[test]
    fn decode_keeps_unrecognised_header() {
        // Only lowercase image subtypes form a header; anything else is payload.
        assert!(decode_payload("data:text/plain;base64,aGVsbG8=").is_err());
    }

    #[tokio::test]
    async fn ingest_stores_bytes_under_fresh_jpg_name() {
        let storage = Arc::new(InMemoryImageStorage::default());
        let ingestor = ImageIngestor::new(storage.clone(), "https://shop.test/");

        let first = ingestor
            .ingest("data:image/png;base64,aGVsbG8=")
            .await
            .unwrap();
        let second = ingestor.ingest("aGVsbG8=").await.unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("https://shop.test/images/"));
        assert!(first.ends_with(".jpg"));

        let file_name = first.rsplit('/').next().unwrap();
        assert_eq!(storage.get(file_name).unwrap(), b"hello");
        assert_eq!(storage.len(), 2);
    }

    #[tokio::test]
    async fn ingest_does_not_store_malformed_payload() {
        let storage = Arc::new(InMemoryImageStorage::default());
        let ingestor = ImageIngestor::new(storage.clone(), "http://localhost:8080");

        assert!(ingestor.ingest("%%%").await.is_err());
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn ingest_reports_storage_failure() {
        let ingestor = ImageIngestor::new(Arc::new(FailingImageStorage), "http://localhost");
        let err = ingestor.ingest("aGVsbG8=").await.unwrap_err();
        assert!(matches!(err, IngestError::Storage(_)));
        assert!(matches!(
            ApplicationError::from(err),
            ApplicationError::ImageDecodeFailed(_)
        ));
    }
}
