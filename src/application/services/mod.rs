mod image_storage;
pub mod image_ingestor;
pub mod product_service;

pub use image_storage::ImageStorage;
