use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use fairstay_catalog::Package;

/// Booking status. Transitions are not validated beyond the label itself
/// parsing; a completed booking can be marked cancelled later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
    Upcoming,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Upcoming => "upcoming",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            "upcoming" => Ok(TransactionStatus::Upcoming),
            other => Err(format!("unknown transaction status: {}", other)),
        }
    }
}

/// The package fields a booking keeps for itself. Frozen at checkout time so
/// later catalog edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageSnapshot {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub image: String,
}

impl PackageSnapshot {
    pub fn of(package: &Package) -> Self {
        Self {
            id: package.id,
            name: package.name.clone(),
            price: package.price,
            duration: package.duration.clone(),
            image: package.image.clone(),
        }
    }
}

/// A completed (or later corrected) booking in the append-only ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub package: PackageSnapshot,
    pub status: TransactionStatus,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[allow(clippy::too_many_arguments)]
impl Transaction {
    pub fn new(
        user_id: String,
        package: PackageSnapshot,
        status: TransactionStatus,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        total_amount: Decimal,
        payment_method: String,
        payment_reference: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            package,
            status,
            check_in,
            check_out,
            guests,
            total_amount,
            payment_method,
            payment_reference,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_status(&mut self, status: TransactionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Cancelled,
            TransactionStatus::Upcoming,
        ] {
            assert_eq!(status.to_string().parse::<TransactionStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        assert!("refunded".parse::<TransactionStatus>().is_err());
    }
}
