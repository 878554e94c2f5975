//! HTTP surface: the webhook endpoint plus a health route.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

use crate::pipeline::{DeliveryOutcome, WebhookProcessor};

/// Path the provider is configured to call.
pub const WEBHOOK_PATH: &str = "/api/webhook";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<WebhookProcessor>,
}

/// Build the Axum router with the webhook and health routes.
pub fn webhook_routes(processor: Arc<WebhookProcessor>) -> Router {
    let state = AppState { processor };

    Router::new()
        .route(
            WEBHOOK_PATH,
            post(receive_webhook)
                .fallback(webhook_active)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "whapi-ledger"
    }))
}

// ── Webhook ─────────────────────────────────────────────────────────────

/// Any non-POST request is a liveness check.
async fn webhook_active() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Webhook active" }))
}

/// POST /api/webhook
///
/// Always answers 200 unless processing hits an unexpected error, so the
/// provider does not redeliver messages that were already seen.
async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let delivery_id = Uuid::new_v4();
    let span = info_span!("delivery", id = %delivery_id);

    // Bodies that are not JSON carry no text and are ignored downstream.
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    match state
        .processor
        .handle(&payload, Utc::now())
        .instrument(span)
        .await
    {
        Ok(DeliveryOutcome::Ignored { reason }) => {
            Json(json!({ "status": "ignored", "reason": reason })).into_response()
        }
        Ok(DeliveryOutcome::Processed { saved }) => {
            Json(json!({ "status": "ok", "saved": saved })).into_response()
        }
        Err(e) => {
            error!(delivery = %delivery_id, error = %e, "Webhook handler error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal" })),
            )
                .into_response()
        }
    }
}

