//! Persistence layer — remote REST storage for classified transactions.

pub mod http_backend;
pub mod traits;

pub use http_backend::HttpTransactionStore;
pub use traits::{StorageRecord, TransactionStore};
