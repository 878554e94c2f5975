//! Reply channel abstraction for acknowledgement messages.

pub mod whapi;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ChannelError;
use crate::pipeline::types::{ClassifiedTransaction, TransactionType};

pub use whapi::WhapiSender;

/// Sends a text message back to the author of a webhook delivery.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Channel name for logging.
    fn name(&self) -> &str;

    /// Send `body` to `to`. Not retried by callers.
    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError>;
}

/// Human-readable acknowledgement for a classified message.
///
/// Echoes the raw text when no (or a zero) amount was found.
pub fn acknowledgement(tx: &ClassifiedTransaction, text: &str) -> String {
    match tx.amount.filter(|a| !a.is_zero()) {
        Some(amount) => {
            let kind = match tx.kind {
                TransactionType::Income => "Receita",
                TransactionType::Expense => "Gasto",
            };
            format!(
                "Anotado ✅ {kind} de R${} ({}).",
                two_places(amount),
                tx.category
            )
        }
        None => format!("Anotado ✅ Mensagem: \"{text}\""),
    }
}

/// Two decimal places, ties rounded away from zero.
fn two_places(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}
