//! `TransactionStore` trait and the record shape it persists.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::StoreError;
use crate::pipeline::rules::LabelSet;
use crate::pipeline::types::ClassifiedTransaction;

/// Value of the `source` column for rows created by this service.
pub const SOURCE_WHATSAPP: &str = "whatsapp";

/// Row written to the `transactions` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageRecord {
    /// Not resolved yet; phone-to-user mapping is out of scope.
    pub user_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub source: String,
    pub raw_message: String,
}

impl StorageRecord {
    /// Build a row from a classification. Missing amounts become zero.
    pub fn from_transaction(tx: &ClassifiedTransaction, raw_message: &str, labels: LabelSet) -> Self {
        Self {
            user_id: None,
            amount: tx.amount_or_zero(),
            kind: labels.transaction_type(tx.kind).to_string(),
            date: tx.date.clone(),
            category: tx.category.clone(),
            description: tx.description.clone(),
            source: SOURCE_WHATSAPP.to_string(),
            raw_message: raw_message.to_string(),
        }
    }
}

/// Remote persistence for classified transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert one row. Not retried by callers.
    async fn insert(&self, record: &StorageRecord) -> Result<(), StoreError>;
}
