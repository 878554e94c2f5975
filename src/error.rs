//! Error types for the webhook ledger.

/// Top-level error type.
///
/// Store and channel failures are logged where they happen and never
/// reach this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage request failed: {0}")]
    Request(String),

    #[error("Storage backend rejected the record with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors from the reply channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send reply on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Malformed inbound payloads that cannot be acknowledged as ignored.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Unsupported timestamp value: {0}")]
    Timestamp(String),
}

/// Result type alias for the webhook ledger.
pub type Result<T> = std::result::Result<T, Error>;
