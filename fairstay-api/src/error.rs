use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use fairstay_booking::BookingError;
use fairstay_catalog::CatalogError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::PackageNotFound(_) => {
                AppError::NotFoundError("Package not found".to_string())
            }
            BookingError::CartNotFound(_) => AppError::NotFoundError("Cart not found".to_string()),
            BookingError::TransactionNotFound(_) => {
                AppError::NotFoundError("Transaction not found".to_string())
            }
            BookingError::Validation(msg) => AppError::ValidationError(msg),
            BookingError::Forbidden(msg) => AppError::AuthorizationError(msg),
            BookingError::PaymentDeclined(reference) => {
                AppError::InternalServerError(format!("Payment failed: {}", reference))
            }
            BookingError::Store(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::NotFoundError("Package not found".to_string()),
            CatalogError::Validation(msg) => AppError::ValidationError(msg),
        }
    }
}
