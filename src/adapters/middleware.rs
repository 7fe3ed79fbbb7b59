use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{adapters::auth::Authenticator, application::error::ApplicationError};

/// Resolves the caller's credentials and attaches the resulting `Principal`
/// to the request. Authorization is left to the handlers' service calls.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticator.authenticate(request.headers()) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => ApplicationError::from(e).into_response(),
    }
}
