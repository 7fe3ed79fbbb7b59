use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::{
    application::{
        dto::product_dto::{
            CreateProductDTO, PageQueryDTO, ProductPageDTO, ResellerProductDTO, UpdateProductDTO,
        },
        error::ApplicationError,
        repositories::{category_repository::CategoryRepository, product_repository::ProductRepository},
        services::image_ingestor::ImageIngestor,
    },
    domain::models::{
        category::Category,
        principal::{Capability, Principal},
        product::{NewProduct, Product},
    },
};

/// Catalog operations: category checks, persistence, image ingestion and
/// reseller pricing. Every call authorizes the principal first.
#[derive(Clone)]
pub struct ProductService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    images: ImageIngestor,
}

impl ProductService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        images: ImageIngestor,
    ) -> Self {
        Self {
            categories,
            products,
            images,
        }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateProductDTO,
    ) -> Result<Product, ApplicationError> {
        authorize(principal, Capability::ManageProducts)?;
        ensure_non_negative(input.value)?;

        let category = self.require_category(input.category_id).await?;

        let image = self.images.ingest(&input.base64_image).await.map_err(|e| {
            error!("Image ingestion failed: {}", e);
            ApplicationError::from(e)
        })?;

        let product = self
            .products
            .create_product(NewProduct {
                name: input.name,
                description: input.description,
                value: input.value,
                image,
                category,
            })
            .await?;

        info!(
            "{} created product {} in category {}",
            principal.name(),
            product.id,
            product.category_id
        );
        Ok(product)
    }

    pub async fn list(
        &self,
        principal: &Principal,
        query: PageQueryDTO,
    ) -> Result<ProductPageDTO, ApplicationError> {
        authorize(principal, Capability::BrowseProducts)?;

        let (offset, limit) = query.bounds().ok_or_else(|| {
            ApplicationError::BadRequest(format!(
                "page ({}) and pageSize ({}) must not be negative",
                query.page, query.page_size
            ))
        })?;

        let (products, count) = self.products.list_products(offset, limit).await?;

        Ok(ProductPageDTO {
            count,
            page: query.page,
            page_size: query.page_size,
            products,
        })
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: i32,
        input: UpdateProductDTO,
    ) -> Result<(), ApplicationError> {
        authorize(principal, Capability::ManageProducts)?;
        ensure_non_negative(input.value)?;

        let mut product = self.require_product(id).await?;
        let category = self.require_category(input.category_id).await?;

        product.replace(
            input.name,
            input.description,
            input.value,
            input.image,
            category,
        );
        self.products.update_product(&product).await?;

        info!("{} updated product {}", principal.name(), id);
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, id: i32) -> Result<(), ApplicationError> {
        authorize(principal, Capability::ManageProducts)?;

        let product = self.require_product(id).await?;
        self.products.delete_product(&product).await?;

        info!("{} deleted product {}", principal.name(), id);
        Ok(())
    }

    pub async fn reseller_feed(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ResellerProductDTO>, ApplicationError> {
        authorize(principal, Capability::ReadResellerFeed)?;

        self.products
            .list_products_with_category()
            .await?
            .into_iter()
            .map(|product| -> Result<ResellerProductDTO, ApplicationError> {
                let value = product.reseller_value().ok_or_else(|| {
                    ApplicationError::InternalError(format!(
                        "cannot discount value {} of product {}",
                        product.value, product.id
                    ))
                })?;
                Ok(ResellerProductDTO {
                    name: product.name,
                    description: product.description,
                    value,
                    image: product.image,
                    category: product.category,
                })
            })
            .collect()
    }

    async fn require_category(&self, id: i32) -> Result<Category, ApplicationError> {
        self.categories.find_category(id).await?.ok_or_else(|| {
            warn!("Category {} does not exist", id);
            ApplicationError::CategoryNotFound
        })
    }

    async fn require_product(&self, id: i32) -> Result<Product, ApplicationError> {
        self.products.find_product(id).await?.ok_or_else(|| {
            warn!("Product {} does not exist", id);
            ApplicationError::ProductNotFound
        })
    }
}

fn authorize(principal: &Principal, capability: Capability) -> Result<(), ApplicationError> {
    if principal.can(capability) {
        Ok(())
    } else {
        warn!("{} lacks {:?}", principal.name(), capability);
        Err(ApplicationError::Forbidden)
    }
}

fn ensure_non_negative(value: Decimal) -> Result<(), ApplicationError> {
    if value < Decimal::ZERO {
        return Err(ApplicationError::BadRequest(format!(
            "value must not be negative, got {}",
            value
        )));
    }
    Ok(())
}
