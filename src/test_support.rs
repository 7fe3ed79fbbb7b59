#![cfg(test)]
use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    application::{
        error::ApplicationError,
        repositories::{category_repository::CategoryRepository, product_repository::ProductRepository},
        services::ImageStorage,
    },
    domain::models::{
        category::Category,
        principal::{Principal, Role},
        product::{NewProduct, Product},
    },
};

pub fn admin() -> Principal {
    Principal::User {
        subject: "admin@test".to_string(),
        roles: vec![Role::Admin],
    }
}

pub fn customer() -> Principal {
    Principal::User {
        subject: "customer@test".to_string(),
        roles: vec![Role::Customer],
    }
}

#[derive(Default)]
struct CatalogState {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// Catalog kept in ordered maps so listings follow id order like the database.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn add_category(&self, name: &str) -> Category {
        let mut state = self.state.lock().unwrap();
        state.next_category_id += 1;
        let category = Category {
            id: state.next_category_id,
            name: name.to_string(),
        };
        state.categories.insert(category.id, category.clone());
        category
    }

    /// Inserts `count` products named `Product 1..=count`, each worth 100.00.
    pub fn seed_products(&self, category: &Category, count: usize) -> Vec<Product> {
        let mut state = self.state.lock().unwrap();
        (1..=count)
            .map(|n| {
                state.next_product_id += 1;
                let product = Product {
                    id: state.next_product_id,
                    name: format!("Product {}", n),
                    description: format!("Description {}", n),
                    value: Decimal::new(10000, 2),
                    image: format!("http://localhost/images/{}.jpg", n),
                    category_id: category.id,
                    category: category.clone(),
                };
                state.products.insert(product.id, product.clone());
                product
            })
            .collect()
    }

    pub fn product(&self, id: i32) -> Option<Product> {
        self.state.lock().unwrap().products.get(&id).cloned()
    }

    pub fn product_count(&self) -> usize {
        self.state.lock().unwrap().products.len()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn find_category(&self, id: i32) -> Result<Option<Category>, ApplicationError> {
        Ok(self.state.lock().unwrap().categories.get(&id).cloned())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find_product(&self, id: i32) -> Result<Option<Product>, ApplicationError> {
        Ok(self.product(id))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ApplicationError> {
        let mut state = self.state.lock().unwrap();
        if !state.categories.contains_key(&product.category.id) {
            return Err(ApplicationError::DatabaseError(
                "foreign key violation on category_id".to_string(),
            ));
        }
        state.next_product_id += 1;
        let created = Product {
            id: state.next_product_id,
            name: product.name,
            description: product.description,
            value: product.value,
            image: product.image,
            category_id: product.category.id,
            category: product.category,
        };
        state.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_product(&self, product: &Product) -> Result<(), ApplicationError> {
        let mut state = self.state.lock().unwrap();
        match state.products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(ApplicationError::DatabaseError(format!(
                "no row for product {}",
                product.id
            ))),
        }
    }

    async fn delete_product(&self, product: &Product) -> Result<(), ApplicationError> {
        self.state.lock().unwrap().products.remove(&product.id);
        Ok(())
    }

    async fn list_products(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), ApplicationError> {
        let state = self.state.lock().unwrap();
        let items = state
            .products
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((items, state.products.len() as i64))
    }

    async fn list_products_with_category(&self) -> Result<Vec<Product>, ApplicationError> {
        Ok(self.state.lock().unwrap().products.values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryImageStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStorage {
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(file_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<(), ApplicationError> {
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), content.to_vec());
        Ok(())
    }
}

/// Storage whose every write fails, as a full disk would.
pub struct FailingImageStorage;

#[async_trait]
impl ImageStorage for FailingImageStorage {
    async fn store(&self, file_name: &str, _content: &[u8]) -> Result<(), ApplicationError> {
        Err(ApplicationError::InternalError(format!(
            "no space left on device while writing {}",
            file_name
        )))
    }
}
