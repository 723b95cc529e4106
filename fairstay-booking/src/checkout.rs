use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use fairstay_core::payment::{PaymentAdapter, PaymentStatus};
use fairstay_core::repository::{CartRepository, PackageRepository, TransactionRepository};
use fairstay_core::transaction::{PackageSnapshot, Transaction, TransactionStatus};

use crate::error::BookingError;

const DEFAULT_PAYMENT_METHOD: &str = "Credit Card";

/// Caller-supplied booking details, shared across every item in the cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl BookingDetails {
    fn validate(&self) -> Result<(), BookingError> {
        if self.guests == 0 {
            return Err(BookingError::Validation(
                "guest count must be at least 1".to_string(),
            ));
        }
        if self.check_out <= self.check_in {
            return Err(BookingError::Validation(
                "check-out must be after check-in".to_string(),
            ));
        }
        Ok(())
    }
}

/// Turns a cart into ledger entries. The whole batch is built and charged
/// before anything is committed, so a failure leaves the cart untouched.
pub struct CheckoutService {
    packages: Arc<dyn PackageRepository>,
    carts: Arc<dyn CartRepository>,
    transactions: Arc<dyn TransactionRepository>,
    payments: Arc<dyn PaymentAdapter>,
}

impl CheckoutService {
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        carts: Arc<dyn CartRepository>,
        transactions: Arc<dyn TransactionRepository>,
        payments: Arc<dyn PaymentAdapter>,
    ) -> Self {
        Self {
            packages,
            carts,
            transactions,
            payments,
        }
    }

    /// Consume the user's entire cart: one transaction per distinct item,
    /// each snapshotting the package it was priced from, then the cart is
    /// cleared. Returns the created transactions.
    pub async fn checkout(
        &self,
        user_id: &str,
        details: BookingDetails,
    ) -> Result<Vec<Transaction>, BookingError> {
        details.validate()?;

        let mut cart = self
            .carts
            .find(user_id)
            .await?
            .filter(|cart| !cart.is_empty())
            .ok_or_else(|| BookingError::Validation("Cart is empty".to_string()))?;

        let method = details
            .payment_method
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        // 1. Build the whole batch before touching any store. Lines whose
        //    package has left the catalog are dropped, consistent with the
        //    cart's pruning policy.
        let mut batch = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            let Some(package) = self.packages.get(item.package_id).await? else {
                continue;
            };
            let total = package.price * Decimal::from(item.quantity);
            batch.push(Transaction::new(
                user_id.to_string(),
                PackageSnapshot::of(&package),
                TransactionStatus::Completed,
                details.check_in,
                details.check_out,
                details.guests,
                total,
                method.clone(),
                None,
            ));
        }
        if batch.is_empty() {
            return Err(BookingError::Validation("Cart is empty".to_string()));
        }

        // 2. One simulated charge for the batch total.
        let amount: Decimal = batch.iter().map(|tx| tx.total_amount).sum();
        let receipt = self.payments.charge(user_id, amount, &method).await?;
        if receipt.status != PaymentStatus::Succeeded {
            return Err(BookingError::PaymentDeclined(receipt.reference));
        }
        for tx in &mut batch {
            tx.payment_reference = Some(receipt.reference.clone());
        }

        // 3. Commit: append the batch, then empty the cart.
        self.transactions.append_batch(batch.clone()).await?;
        cart.clear();
        self.carts.save(cart).await?;

        tracing::info!(
            "Checkout completed for {}: {} transaction(s), {} total",
            user_id,
            batch.len(),
            amount
        );
        Ok(batch)
    }
}
