use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use fairstay_core::repository::TransactionRepository;
use fairstay_core::transaction::{Transaction, TransactionStatus};
use fairstay_core::StoreError;

/// Append-only booking ledger, kept in process memory in insertion order.
#[derive(Default)]
pub struct InMemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionStore {
    async fn append_batch(&self, transactions: Vec<Transaction>) -> Result<(), StoreError> {
        let mut ledger = self.transactions.write();
        tracing::debug!("Appending {} transaction(s) to the ledger", transactions.len());
        ledger.extend(transactions);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .read()
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.read().iter().find(|tx| tx.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>, StoreError> {
        let mut ledger = self.transactions.write();
        match ledger.iter_mut().find(|tx| tx.id == id) {
            Some(tx) => {
                tx.update_status(status);
                Ok(Some(tx.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fairstay_core::transaction::PackageSnapshot;
    use rust_decimal_macros::dec;

    fn sample(user_id: &str) -> Transaction {
        Transaction::new(
            user_id.to_string(),
            PackageSnapshot {
                id: Uuid::new_v4(),
                name: "Lakeside Cottage".to_string(),
                price: dec!(4499),
                duration: "2 days".to_string(),
                image: String::new(),
            },
            TransactionStatus::Completed,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            2,
            dec!(8998),
            "Credit Card".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn list_filters_by_owning_user() {
        let store = InMemoryTransactionStore::new();
        store
            .append_batch(vec![sample("user-1"), sample("user-2"), sample("user-1")])
            .await
            .unwrap();

        assert_eq!(store.list_for_user("user-1").await.unwrap().len(), 2);
        assert_eq!(store.list_for_user("user-3").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn update_status_touches_only_the_target() {
        let store = InMemoryTransactionStore::new();
        let tx = sample("user-1");
        let other = sample("user-1");
        let id = tx.id;
        store.append_batch(vec![tx, other.clone()]).await.unwrap();

        let updated = store
            .update_status(id, TransactionStatus::Cancelled)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, TransactionStatus::Cancelled);
        let untouched = store.get(other.id).await.unwrap().unwrap();
        assert_eq!(untouched.status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn update_status_for_unknown_id_returns_none() {
        let store = InMemoryTransactionStore::new();
        let missing = store
            .update_status(Uuid::new_v4(), TransactionStatus::Cancelled)
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
