//! REST table backend (Lovable / Supabase-style `rest/tables/.../rows`).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::config::StorageConfig;
use crate::error::StoreError;
use crate::store::traits::{StorageRecord, TransactionStore};

/// Path of the transactions table relative to the project base URL.
const TRANSACTIONS_ROWS_PATH: &str = "rest/tables/transactions/rows";

/// Stores records with a single authenticated POST per row.
pub struct HttpTransactionStore {
    endpoint: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl HttpTransactionStore {
    pub fn new(config: &StorageConfig, client: reqwest::Client) -> Self {
        Self {
            endpoint: rows_endpoint(&config.base_url),
            api_key: config.api_key.clone(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn rows_endpoint(base_url: &str) -> String {
    format!("{}/{TRANSACTIONS_ROWS_PATH}", base_url.trim_end_matches('/'))
}

#[async_trait]
impl TransactionStore for HttpTransactionStore {
    async fn insert(&self, record: &StorageRecord) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Storage backend rejected record");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(endpoint = %self.endpoint, "Record stored");
        Ok(())
    }
}
