mod adapters;
mod application;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use adapters::{
    auth::Authenticator,
    repositories::{PgCategoryRepository, PgProductRepository},
    routes::build_router,
    state::AppState,
};
use application::{
    repositories::{category_repository::CategoryRepository, product_repository::ProductRepository},
    services::{image_ingestor::ImageIngestor, product_service::ProductService},
};
use axum::http::HeaderValue;
use domain::config::app::AppConfig;
use services::LocalImageStorage;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| panic!("ERROR: {}", e));

    tracing::info!("Starting catalog-service on port {}", config.port);

    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Development default
        None => CorsLayer::permissive(),
    };

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("ERROR: Failed to apply database migrations");
    tracing::info!("Database ready");

    let image_storage = LocalImageStorage::new(config.image_dir.clone())
        .await
        .expect("ERROR: Failed to prepare image directory");
    tracing::info!("Serving images from {}", image_storage.root().display());

    let product_service = ProductService::new(
        Arc::new(PgCategoryRepository::new(pool.clone())) as Arc<dyn CategoryRepository>,
        Arc::new(PgProductRepository::new(pool.clone())) as Arc<dyn ProductRepository>,
        ImageIngestor::new(Arc::new(image_storage), config.public_base_url.clone()),
    );

    let app_state = AppState {
        product_service,
        authenticator: Arc::new(Authenticator::new(
            &config.jwt_secret,
            config.reseller_api_key.clone(),
        )),
        pool,
    };

    let router = build_router(app_state, &config.image_dir, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
