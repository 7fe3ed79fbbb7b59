use std::path::Path;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    adapters::{
        controllers::{health_controller::HealthController, product_controller::ProductController},
        middleware::authenticate,
        state::AppState,
    },
    application::services::image_ingestor::IMAGE_ROUTE,
};

pub fn build_router(app_state: AppState, image_dir: &Path, cors: CorsLayer) -> Router {
    // Every catalog route needs a principal; which one is decided per operation.
    let product_routes = Router::new()
        .route(
            "/product",
            get(ProductController::list_products).post(ProductController::create_product),
        )
        .route("/product/revendedor", get(ProductController::reseller_feed))
        .route(
            "/product/{id}",
            put(ProductController::update_product).delete(ProductController::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            authenticate,
        ));

    let public_routes = Router::new()
        .route("/health", get(HealthController::health_check))
        .nest_service(IMAGE_ROUTE, ServeDir::new(image_dir));

    Router::new()
        .merge(product_routes)
        .merge(public_routes)
        .layer(cors)
        .with_state(app_state)
}
