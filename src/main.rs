use std::sync::Arc;

use anyhow::Context;

use whapi_ledger::config::WebhookConfig;
use whapi_ledger::pipeline::WebhookProcessor;
use whapi_ledger::server::{WEBHOOK_PATH, webhook_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = WebhookConfig::from_env().context("invalid configuration")?;
    let processor = WebhookProcessor::from_config(&config).context("failed to build processor")?;

    eprintln!("📒 Whapi Ledger v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://{}{}", config.bind_addr, WEBHOOK_PATH);
    eprintln!("   Labels: {}", config.labels);
    eprintln!(
        "   Storage: {}",
        match &config.storage {
            Some(storage) => format!("enabled ({})", storage.base_url),
            None => "disabled (LOVABLE_URL / LOVABLE_API_KEY not set)".to_string(),
        }
    );
    eprintln!(
        "   Replies: {}",
        match &config.reply {
            Some(reply) => format!("enabled ({})", reply.send_url),
            None => "disabled (WHAPI_SEND_URL / WHAPI_TOKEN not set)".to_string(),
        }
    );
    if !config.extra_categories.is_empty() {
        eprintln!("   Extra categories: {}", config.extra_categories.join(", "));
    }
    eprintln!();

    let app = webhook_routes(Arc::new(processor));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
