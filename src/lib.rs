//! Whapi ledger — WhatsApp webhook that turns chat messages into transactions.

pub mod channels;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod store;
