use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    adapters::auth::Authenticator, application::services::product_service::ProductService,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub product_service: ProductService,
    pub authenticator: Arc<Authenticator>,
    pub pool: sqlx::PgPool,
}
