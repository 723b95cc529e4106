use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::StoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Succeeded,
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub reference: String,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub method: String,
    pub processed_at: DateTime<Utc>,
}

/// Seam to the payment provider. The provider is an external collaborator;
/// this service only consumes the outcome of a charge.
#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    async fn charge(
        &self,
        user_id: &str,
        amount: Decimal,
        method: &str,
    ) -> Result<PaymentReceipt, StoreError>;
}

/// Simulated payment provider: approves every charge and mints a reference.
pub struct MockPaymentAdapter;

#[async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn charge(
        &self,
        user_id: &str,
        amount: Decimal,
        method: &str,
    ) -> Result<PaymentReceipt, StoreError> {
        tracing::info!("Simulated {} charge of {} for {}", method, amount, user_id);

        Ok(PaymentReceipt {
            reference: format!("pay_{}", Uuid::new_v4().simple()),
            status: PaymentStatus::Succeeded,
            amount,
            method: method.to_string(),
            processed_at: Utc::now(),
        })
    }
}
