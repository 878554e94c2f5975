//! Webhook processor — classifies a delivery, stores it, and acknowledges it.
//!
//! Flow:
//! 1. Payload normalization → may short-circuit as ignored
//! 2. Classification (pure, no I/O)
//! 3. Persistence (optional, failures logged)
//! 4. Reply (optional, failures logged)
//!
//! Downstream failures never fail the delivery: the provider retries on
//! non-2xx responses, so a broken backend must not cause duplicate traffic.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::channels::{ReplySender, WhapiSender, acknowledgement};
use crate::config::WebhookConfig;
use crate::error::{ConfigError, Result};
use crate::pipeline::classifier::Classifier;
use crate::pipeline::payload::extract_message;
use crate::pipeline::types::DeliveryOutcome;
use crate::store::{HttpTransactionStore, StorageRecord, TransactionStore};

/// Reason reported for deliveries without message text.
pub const NO_TEXT: &str = "no_text";

/// Processes webhook deliveries. Shared across requests behind an `Arc`.
pub struct WebhookProcessor {
    classifier: Arc<Classifier>,
    store: Option<Arc<dyn TransactionStore>>,
    reply: Option<Arc<dyn ReplySender>>,
}

impl WebhookProcessor {
    /// Create a processor with no outbound integrations.
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self {
            classifier,
            store: None,
            reply: None,
        }
    }

    /// Wire the classifier and the HTTP integrations enabled in `config`.
    pub fn from_config(config: &WebhookConfig) -> Result<Self> {
        let mut classifier = Classifier::default_rules(config.labels);
        for keyword in &config.extra_categories {
            classifier.add_category_keyword(keyword)?;
        }

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let mut processor = Self::new(Arc::new(classifier));
        if let Some(storage) = &config.storage {
            processor = processor.with_store(Arc::new(HttpTransactionStore::new(
                storage,
                client.clone(),
            )));
        }
        if let Some(reply) = &config.reply {
            processor = processor.with_reply(Arc::new(WhapiSender::new(reply, client)));
        }
        Ok(processor)
    }

    pub fn storage_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn reply_enabled(&self) -> bool {
        self.reply.is_some()
    }

    pub fn with_store(mut self, store: Arc<dyn TransactionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_reply(mut self, reply: Arc<dyn ReplySender>) -> Self {
        self.reply = Some(reply);
        self
    }

    /// Handle one webhook body.
    ///
    /// Only malformed payloads that cannot be ignored (e.g. a timestamp of an
    /// unsupported type) produce an error.
    pub async fn handle(
        &self,
        body: &Value,
        received_at: DateTime<Utc>,
    ) -> Result<DeliveryOutcome> {
        let Some(message) = extract_message(body, received_at)? else {
            info!(payload = %body, "No message text found in incoming payload");
            return Ok(DeliveryOutcome::Ignored { reason: NO_TEXT });
        };

        let tx = self.classifier.classify(&message.text, &message.timestamp);
        let record = StorageRecord::from_transaction(&tx, &message.text, self.classifier.labels());

        info!(
            sender = message.sender.as_deref().unwrap_or(""),
            amount = %record.amount,
            kind = %record.kind,
            category = %record.category,
            date = %record.date,
            "Parsed payload"
        );
        if let Some(group) = self.classifier.group_for(&tx.category) {
            debug!(?group, "Category group");
        }

        let saved = match &self.store {
            Some(store) => match store.insert(&record).await {
                Ok(()) => {
                    info!("Saved transaction");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Failed to save transaction");
                    false
                }
            },
            None => {
                warn!("Storage credentials missing, skipping save");
                false
            }
        };

        match &self.reply {
            Some(reply) => {
                let text = acknowledgement(&tx, &message.text);
                let to = message.sender.as_deref().unwrap_or("");
                if let Err(e) = reply.send(to, &text).await {
                    error!(channel = reply.name(), error = %e, "Error sending WhatsApp reply");
                }
            }
            None => info!("Reply credentials missing, skipping WhatsApp reply"),
        }

        Ok(DeliveryOutcome::Processed { saved })
    }
}
