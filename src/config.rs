//! Configuration types.
//!
//! Everything is read from the environment once at startup. Each outbound
//! integration is enabled only when both its URL and its credential are set;
//! a missing pair disables that integration and is never fatal.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::pipeline::rules::LabelSet;

/// Storage backend (Lovable / Supabase-style REST tables).
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://your-project.lovable.app`.
    pub base_url: String,
    /// Bearer key for the REST API.
    pub api_key: SecretString,
}

/// Messaging provider send endpoint (Whapi or compatible).
#[derive(Debug, Clone)]
pub struct ReplyConfig {
    /// Full send URL, e.g. `https://gate.whapi.cloud/messages/text`.
    pub send_url: String,
    pub token: SecretString,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Persistence target (None disables saving).
    pub storage: Option<StorageConfig>,
    /// Reply target (None disables acknowledgements).
    pub reply: Option<ReplyConfig>,
    /// Output spelling for transaction types and the fallback category.
    pub labels: LabelSet,
    /// Extra category keywords appended after the built-in ones.
    pub extra_categories: Vec<String>,
    /// Timeout for each outbound HTTP call.
    pub http_timeout: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            storage: None,
            reply: None,
            labels: LabelSet::default(),
            extra_categories: Vec::new(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl WebhookConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match var("WHAPI_LEDGER_BIND") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
                key: "WHAPI_LEDGER_BIND".into(),
                message: format!("{raw}: {e}"),
            })?,
            None => defaults.bind_addr,
        };

        let storage = match (var("LOVABLE_URL"), var("LOVABLE_API_KEY")) {
            (Some(base_url), Some(api_key)) => Some(StorageConfig {
                base_url,
                api_key: SecretString::from(api_key),
            }),
            _ => None,
        };

        let reply = match (var("WHAPI_SEND_URL"), var("WHAPI_TOKEN")) {
            (Some(send_url), Some(token)) => Some(ReplyConfig {
                send_url,
                token: SecretString::from(token),
            }),
            _ => None,
        };

        let labels = match var("WHAPI_LEDGER_LABELS") {
            Some(raw) => raw.parse::<LabelSet>()?,
            None => defaults.labels,
        };

        let extra_categories: Vec<String> = var("WHAPI_LEDGER_EXTRA_CATEGORIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let http_timeout = match var("WHAPI_LEDGER_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "WHAPI_LEDGER_HTTP_TIMEOUT_SECS".into(),
                    message: format!("expected whole seconds, got '{raw}'"),
                }
            })?),
            None => defaults.http_timeout,
        };

        Ok(Self {
            bind_addr,
            storage,
            reply,
            labels,
            extra_categories,
            http_timeout,
        })
    }
}
