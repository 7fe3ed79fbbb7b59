use axum::extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    FromRequest, FromRequestParts,
};

use crate::application::error::ApplicationError;

/// `axum::Json` whose rejection goes through `ApplicationError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApplicationError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApplicationError))]
pub struct AppQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApplicationError))]
pub struct AppPath<T>(pub T);

impl From<JsonRejection> for ApplicationError {
    fn from(rejection: JsonRejection) -> Self {
        ApplicationError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApplicationError {
    fn from(rejection: QueryRejection) -> Self {
        ApplicationError::BadRequest(rejection.body_text())
    }
}

// The only path parameter is a product id; one that does not parse names no product.
impl From<PathRejection> for ApplicationError {
    fn from(_: PathRejection) -> Self {
        ApplicationError::ProductNotFound
    }
}
