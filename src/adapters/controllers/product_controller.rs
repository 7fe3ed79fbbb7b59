use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use crate::{
    adapters::extract::{AppJson, AppPath, AppQuery},
    application::{
        dto::product_dto::{
            CreateProductDTO, PageQueryDTO, ProductPageDTO, ResellerProductDTO, UpdateProductDTO,
        },
        error::ApplicationError,
        services::product_service::ProductService,
    },
    domain::models::principal::Principal,
};

pub struct ProductController;

impl ProductController {
    /// POST /product
    pub async fn create_product(
        State(service): State<ProductService>,
        Extension(principal): Extension<Principal>,
        AppJson(body): AppJson<CreateProductDTO>,
    ) -> Result<StatusCode, ApplicationError> {
        info!("Creating product '{}' in category {}", body.name, body.category_id);
        service.create(&principal, body).await?;
        Ok(StatusCode::OK)
    }

    /// GET /product?page=&pageSize=
    pub async fn list_products(
        State(service): State<ProductService>,
        Extension(principal): Extension<Principal>,
        AppQuery(query): AppQuery<PageQueryDTO>,
    ) -> Result<Json<ProductPageDTO>, ApplicationError> {
        let page = service.list(&principal, query).await?;
        Ok(Json(page))
    }

    /// PUT /product/{id}
    pub async fn update_product(
        State(service): State<ProductService>,
        Extension(principal): Extension<Principal>,
        AppPath(id): AppPath<i32>,
        AppJson(body): AppJson<UpdateProductDTO>,
    ) -> Result<StatusCode, ApplicationError> {
        info!("Updating product {}", id);
        service.update(&principal, id, body).await?;
        Ok(StatusCode::OK)
    }

    /// DELETE /product/{id}
    pub async fn delete_product(
        State(service): State<ProductService>,
        Extension(principal): Extension<Principal>,
        AppPath(id): AppPath<i32>,
    ) -> Result<StatusCode, ApplicationError> {
        info!("Deleting product {}", id);
        service.delete(&principal, id).await?;
        Ok(StatusCode::OK)
    }

    /// GET /product/revendedor
    pub async fn reseller_feed(
        State(service): State<ProductService>,
        Extension(principal): Extension<Principal>,
    ) -> Result<Json<Vec<ResellerProductDTO>>, ApplicationError> {
        let feed = service.reseller_feed(&principal).await?;
        info!("Serving reseller feed with {} products", feed.len());
        Ok(Json(feed))
    }
}
