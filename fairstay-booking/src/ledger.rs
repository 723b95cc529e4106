use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use fairstay_core::repository::TransactionRepository;
use fairstay_core::transaction::{PackageSnapshot, Transaction, TransactionStatus};

use crate::error::BookingError;

/// Caller-supplied fields for the explicit create endpoint (bookings made
/// outside the cart flow). The owner is always the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub package: PackageSnapshot,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_amount: Decimal,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Read and correction operations over the append-only booking ledger.
pub struct LedgerService {
    transactions: Arc<dyn TransactionRepository>,
}

impl LedgerService {
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Transaction>, BookingError> {
        Ok(self.transactions.list_for_user(user_id).await?)
    }

    /// Fails with Forbidden when the transaction belongs to another user.
    pub async fn get(&self, user_id: &str, id: Uuid) -> Result<Transaction, BookingError> {
        let tx = self
            .transactions
            .get(id)
            .await?
            .ok_or(BookingError::TransactionNotFound(id))?;
        if tx.user_id != user_id {
            return Err(BookingError::Forbidden(
                "Not authorized to view this transaction".to_string(),
            ));
        }
        Ok(tx)
    }

    pub async fn create(
        &self,
        user_id: &str,
        new: NewTransaction,
    ) -> Result<Transaction, BookingError> {
        if new.guests == 0 {
            return Err(BookingError::Validation(
                "guest count must be at least 1".to_string(),
            ));
        }
        if new.total_amount <= Decimal::ZERO {
            return Err(BookingError::Validation(
                "total amount must be positive".to_string(),
            ));
        }
        if new.check_out <= new.check_in {
            return Err(BookingError::Validation(
                "check-out must be after check-in".to_string(),
            ));
        }

        let tx = Transaction::new(
            user_id.to_string(),
            new.package,
            new.status.unwrap_or(TransactionStatus::Completed),
            new.check_in,
            new.check_out,
            new.guests,
            new.total_amount,
            new.payment_method
                .unwrap_or_else(|| "Credit Card".to_string()),
            None,
        );
        self.transactions.append_batch(vec![tx.clone()]).await?;
        Ok(tx)
    }

    /// Status corrections (e.g. marking a booking cancelled). Ownership is
    /// checked before anything is written.
    pub async fn update_status(
        &self,
        user_id: &str,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Transaction, BookingError> {
        let existing = self
            .transactions
            .get(id)
            .await?
            .ok_or(BookingError::TransactionNotFound(id))?;
        if existing.user_id != user_id {
            return Err(BookingError::Forbidden(
                "Not authorized to update this transaction".to_string(),
            ));
        }

        self.transactions
            .update_status(id, status)
            .await?
            .ok_or(BookingError::TransactionNotFound(id))
    }
}
