use async_trait::async_trait;
use uuid::Uuid;

use fairstay_catalog::Package;

use crate::cart::Cart;
use crate::transaction::{Transaction, TransactionStatus};
use crate::StoreError;

/// Repository trait for package catalog access
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn create(&self, package: Package) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Package>, StoreError>;

    async fn list(&self) -> Result<Vec<Package>, StoreError>;

    /// Replace the stored package carrying the same id.
    async fn update(&self, package: Package) -> Result<(), StoreError>;

    /// Remove and return the deleted record.
    async fn delete(&self, id: Uuid) -> Result<Option<Package>, StoreError>;
}

/// Repository trait for cart access, keyed by user id
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<Cart>, StoreError>;

    /// Insert or replace the user's cart.
    async fn save(&self, cart: Cart) -> Result<(), StoreError>;
}

/// Repository trait for the append-only transaction ledger
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn append_batch(&self, transactions: Vec<Transaction>) -> Result<(), StoreError>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>, StoreError>;
}
