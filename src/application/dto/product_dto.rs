use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::models::{category::Category, product::Product};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductDTO {
    #[serde(rename = "categoryId")]
    pub category_id: i32,
    pub name: String,
    pub value: Decimal,
    pub description: String,
    #[serde(rename = "base64Image")]
    pub base64_image: String,
}

/// Full replacement of a product; every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductDTO {
    #[serde(rename = "categoryId")]
    pub category_id: i32,
    pub name: String,
    pub value: Decimal,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQueryDTO {
    #[serde(default)]
    pub page: i32,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: i32,
}

fn default_page_size() -> i32 {
    10
}

impl Default for PageQueryDTO {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

impl PageQueryDTO {
    /// Offset and limit for the store. Negative values are rejected.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        if self.page < 0 || self.page_size < 0 {
            return None;
        }
        let limit = i64::from(self.page_size);
        Some((i64::from(self.page) * limit, limit))
    }
}

#[derive(Debug, Serialize)]
pub struct ProductPageDTO {
    pub count: i64,
    pub page: i32,
    #[serde(rename = "pageSize")]
    pub page_size: i32,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ResellerProductDTO {
    pub name: String,
    pub description: String,
    pub value: Decimal,
    pub image: String,
    pub category: Category,
}
