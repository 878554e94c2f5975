//! Shared types for the message processing pipeline.

use rust_decimal::Decimal;

// ── Inbound message ─────────────────────────────────────────────────

/// A single user message extracted from a webhook delivery.
///
/// Lives only for the duration of one request. The payload normalizer
/// guarantees `text` is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Message body as typed by the user.
    pub text: String,
    /// Phone number or handle of the author, when the provider sent one.
    pub sender: Option<String>,
    /// ISO-8601 timestamp; receipt time when the payload carried none.
    pub timestamp: String,
}

// ── Classification ──────────────────────────────────────────────────

/// Direction of money for a classified message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

/// Structured result of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTransaction {
    /// First number found in the text, if any.
    pub amount: Option<Decimal>,
    pub kind: TransactionType,
    /// Lower-cased matched keyword, or the label set's "others" tag.
    pub category: String,
    /// The full trimmed text, unmodified.
    pub description: String,
    /// Calendar date portion of the timestamp (`YYYY-MM-DD` in practice).
    pub date: String,
}

impl ClassifiedTransaction {
    /// Amount with absence collapsed to zero, for sinks that require a number.
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

// ── Outcome ─────────────────────────────────────────────────────────

/// What happened to a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No message text could be extracted.
    Ignored { reason: &'static str },
    /// The message was classified; `saved` is true when the backend accepted it.
    Processed { saved: bool },
}
