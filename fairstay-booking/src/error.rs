use uuid::Uuid;

use fairstay_core::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Package not found: {0}")]
    PackageNotFound(Uuid),

    #[error("Cart not found for user {0}")]
    CartNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        BookingError::Store(err.to_string())
    }
}
