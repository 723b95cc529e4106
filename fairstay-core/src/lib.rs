pub mod cart;
pub mod payment;
pub mod repository;
pub mod transaction;

/// Boxed error type shared by the repository and payment seams.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;
