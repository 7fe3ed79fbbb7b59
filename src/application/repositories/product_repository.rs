use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::product::{NewProduct, Product},
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_product(&self, id: i32) -> Result<Option<Product>, ApplicationError>;
    async fn create_product(&self, product: NewProduct) -> Result<Product, ApplicationError>;
    async fn update_product(&self, product: &Product) -> Result<(), ApplicationError>;
    async fn delete_product(&self, product: &Product) -> Result<(), ApplicationError>;

    /// Returns the requested slice in id order together with the total row count.
    async fn list_products(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), ApplicationError>;

    async fn list_products_with_category(&self) -> Result<Vec<Product>, ApplicationError>;
}
