use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

/// Fixed body for every fault; details stay in the logs.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApplicationError::CategoryNotFound => {
                (StatusCode::NOT_FOUND, "Category not found".to_string())
            }
            ApplicationError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "Product not found".to_string())
            }
            ApplicationError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApplicationError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApplicationError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            ApplicationError::ImageDecodeFailed(ref msg) => {
                error!("Image decode failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            ApplicationError::DatabaseError(ref msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
