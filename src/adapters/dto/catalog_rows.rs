use sqlx::{postgres::PgRow, FromRow, Row};

use crate::domain::models::{category::Category, product::Product};

impl FromRow<'_, PgRow> for Category {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Category {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}

/// Expects the product columns plus `category_name` from the joined category.
impl FromRow<'_, PgRow> for Product {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let category_id: i32 = row.try_get("category_id")?;
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            value: row.try_get("value")?,
            image: row.try_get("image")?,
            category_id,
            category: Category {
                id: category_id,
                name: row.try_get("category_name")?,
            },
        })
    }
}
