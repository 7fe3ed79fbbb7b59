use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::category::Category};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_category(&self, id: i32) -> Result<Option<Category>, ApplicationError>;
}
