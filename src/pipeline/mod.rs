//! Message processing pipeline.
//!
//! Every webhook delivery flows through:
//! 1. `payload::extract_message()` — provider shape normalization
//! 2. `Classifier::classify()` — amount, type and category heuristics
//! 3. `WebhookProcessor::handle()` — persistence and acknowledgement

pub mod classifier;
pub mod payload;
pub mod processor;
pub mod rules;
pub mod types;

pub use classifier::Classifier;
pub use processor::WebhookProcessor;
pub use types::{ClassifiedTransaction, DeliveryOutcome, InboundMessage, TransactionType};
