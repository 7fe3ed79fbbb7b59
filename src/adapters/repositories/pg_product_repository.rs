use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar};

use crate::{
    application::{error::ApplicationError, repositories::product_repository::ProductRepository},
    domain::models::product::{NewProduct, Product},
};

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT p.id, p.name, p.description, p.value, p.image, p.category_id,
           c.name AS category_name
    FROM catalog.products p
    JOIN catalog.categories c ON c.id = p.category_id
"#;

pub struct PgProductRepository {
    pool: sqlx::PgPool,
}

impl PgProductRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_product(&self, id: i32) -> Result<Option<Product>, ApplicationError> {
        let query = format!("{} WHERE p.id = $1", SELECT_WITH_CATEGORY);

        query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ApplicationError> {
        let query = r#"
            INSERT INTO catalog.products (name, description, value, image, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        "#;

        let id: i32 = query_scalar(query)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.value)
            .bind(&product.image)
            .bind(product.category.id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(Product {
            id,
            name: product.name,
            description: product.description,
            value: product.value,
            image: product.image,
            category_id: product.category.id,
            category: product.category,
        })
    }

    async fn update_product(&self, product: &Product) -> Result<(), ApplicationError> {
        let sql = r#"
            UPDATE catalog.products
            SET name = $1, description = $2, value = $3, image = $4, category_id = $5
            WHERE id = $6
        "#;

        let result = query(sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.value)
            .bind(&product.image)
            .bind(product.category_id)
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        // Removed between lookup and write.
        if result.rows_affected() == 0 {
            return Err(ApplicationError::ProductNotFound);
        }
        Ok(())
    }

    async fn delete_product(&self, product: &Product) -> Result<(), ApplicationError> {
        let sql = "DELETE FROM catalog.products WHERE id = $1";

        let result = query(sql)
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::ProductNotFound);
        }
        Ok(())
    }

    async fn list_products(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), ApplicationError> {
        let page_query = format!("{} ORDER BY p.id OFFSET $1 LIMIT $2", SELECT_WITH_CATEGORY);

        let (count, products) = tokio::try_join!(
            query_scalar::<_, i64>("SELECT COUNT(*) FROM catalog.products").fetch_one(&self.pool),
            query_as::<_, Product>(&page_query)
                .bind(offset)
                .bind(limit)
                .fetch_all(&self.pool),
        )
        .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok((products, count))
    }

    async fn list_products_with_category(&self) -> Result<Vec<Product>, ApplicationError> {
        let query = format!("{} ORDER BY p.id", SELECT_WITH_CATEGORY);

        query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }
}
