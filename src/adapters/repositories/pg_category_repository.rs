use async_trait::async_trait;
use sqlx::query_as;

use crate::{
    application::{error::ApplicationError, repositories::category_repository::CategoryRepository},
    domain::models::category::Category,
};

pub struct PgCategoryRepository {
    pool: sqlx::PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_category(&self, id: i32) -> Result<Option<Category>, ApplicationError> {
        let query = "SELECT id, name FROM catalog.categories WHERE id = $1";

        query_as::<_, Category>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }
}
