//! Webhook payload normalization.
//!
//! Whapi and similar providers deliver messages in several JSON shapes:
//!
//! - `{ "from": "+55...", "message": "gastei 25 no mercado", "timestamp": "..." }`
//! - `{ "messages": [{ "from": "+55...", "text": "gastei 25 no mercado" }] }`
//! - `{ "messages": [{ "from": "+55...", "text": { "body": "..." }, "timestamp": 1714557600 }] }`
//!
//! This module pulls the text, sender and timestamp out of whichever shape
//! arrived. Only the first entry of a `messages` array is considered.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::PayloadError;
use crate::pipeline::types::InboundMessage;

/// Extract an [`InboundMessage`] from a raw webhook body.
///
/// Returns `Ok(None)` when no usable text is present (the delivery should be
/// acknowledged as ignored). `received_at` is used when the payload carries
/// no timestamp.
pub fn extract_message(
    body: &Value,
    received_at: DateTime<Utc>,
) -> Result<Option<InboundMessage>, PayloadError> {
    let first = first_message(body);

    let text = body
        .get("message")
        .and_then(text_value)
        .or_else(|| {
            first.and_then(|m| {
                m.get("text")
                    .and_then(text_value)
                    .or_else(|| m.get("body").and_then(text_value))
            })
        })
        .or_else(|| body.get("text").and_then(text_value));

    let Some(text) = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let sender = body
        .get("from")
        .and_then(string_value)
        .or_else(|| {
            first.and_then(|m| {
                m.get("from")
                    .and_then(string_value)
                    .or_else(|| m.get("sender").and_then(string_value))
            })
        })
        .or_else(|| body.get("author").and_then(string_value));

    let timestamp = match body
        .get("timestamp")
        .filter(|v| !is_empty(v))
        .or_else(|| first.and_then(|m| m.get("timestamp")).filter(|v| !is_empty(v)))
    {
        Some(value) => timestamp_value(value)?,
        None => received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    Ok(Some(InboundMessage {
        text,
        sender,
        timestamp,
    }))
}

fn first_message(body: &Value) -> Option<&Value> {
    body.get("messages")?.as_array()?.first()
}

/// Message text: a string, a number, or an object with a string `body`.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("body").and_then(string_value),
        _ => None,
    }
}

fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Timestamps arrive as ISO-8601 strings or Unix seconds.
fn timestamp_value(value: &Value) -> Result<String, PayloadError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            .ok_or_else(|| PayloadError::Timestamp(n.to_string())),
        other => Err(PayloadError::Timestamp(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn received() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn extract(body: Value) -> Option<InboundMessage> {
        extract_message(&body, received()).unwrap()
    }

    #[test]
    fn flat_payload() {
        let msg = extract(json!({
            "from": "+5511999990000",
            "message": "gastei 25 no mercado",
            "timestamp": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(msg.text, "gastei 25 no mercado");
        assert_eq!(msg.sender.as_deref(), Some("+5511999990000"));
        assert_eq!(msg.timestamp, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn messages_array_with_text() {
        let msg = extract(json!({
            "messages": [
                { "from": "+5511", "text": "uber 15" },
                { "from": "+5522", "text": "ignored second" }
            ]
        }))
        .unwrap();
        assert_eq!(msg.text, "uber 15");
        assert_eq!(msg.sender.as_deref(), Some("+5511"));
    }

    #[test]
    fn messages_array_with_body_and_sender() {
        let msg = extract(json!({
            "messages": [{ "sender": "alice", "body": "lanche 12" }]
        }))
        .unwrap();
        assert_eq!(msg.text, "lanche 12");
        assert_eq!(msg.sender.as_deref(), Some("alice"));
    }

    #[test]
    fn whapi_text_object() {
        let msg = extract(json!({
            "messages": [{
                "from": "5511988887777",
                "text": { "body": "recebi 300" },
                "timestamp": 1714557600
            }]
        }))
        .unwrap();
        assert_eq!(msg.text, "recebi 300");
        assert_eq!(msg.timestamp, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn top_level_text_and_author() {
        let msg = extract(json!({ "text": "luz 90", "author": "bob" })).unwrap();
        assert_eq!(msg.text, "luz 90");
        assert_eq!(msg.sender.as_deref(), Some("bob"));
    }

    #[test]
    fn message_field_takes_precedence() {
        let msg = extract(json!({
            "message": "first",
            "text": "third",
            "messages": [{ "text": "second" }]
        }))
        .unwrap();
        assert_eq!(msg.text, "first");
    }

    #[test]
    fn top_level_from_takes_precedence() {
        let msg = extract(json!({
            "from": "top",
            "author": "author",
            "messages": [{ "from": "nested", "text": "x" }]
        }))
        .unwrap();
        assert_eq!(msg.sender.as_deref(), Some("top"));
    }

    #[test]
    fn missing_sender_is_none() {
        let msg = extract(json!({ "message": "agua 30" })).unwrap();
        assert_eq!(msg.sender, None);
    }

    #[test]
    fn text_is_trimmed() {
        let msg = extract(json!({ "message": "  gastei 10  \n" })).unwrap();
        assert_eq!(msg.text, "gastei 10");
    }

    #[test]
    fn no_text_yields_none() {
        assert!(extract(json!({})).is_none());
        assert!(extract(json!({ "from": "+55" })).is_none());
        assert!(extract(json!({ "messages": [] })).is_none());
        assert!(extract(json!({ "message": "" })).is_none());
        assert!(extract(json!(["not", "an", "object"])).is_none());
        assert!(extract(json!("plain string")).is_none());
    }

    #[test]
    fn whitespace_only_text_yields_none() {
        assert!(extract(json!({ "message": "   " })).is_none());
    }

    #[test]
    fn numeric_message_is_stringified() {
        let msg = extract(json!({ "message": 42 })).unwrap();
        assert_eq!(msg.text, "42");
    }

    #[test]
    fn missing_timestamp_defaults_to_receipt_time() {
        let msg = extract(json!({ "message": "uber 10" })).unwrap();
        assert_eq!(msg.timestamp, "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn non_scalar_timestamp_is_an_error() {
        let body = json!({ "message": "uber 10", "timestamp": { "seconds": 1 } });
        let err = extract_message(&body, received()).unwrap_err();
        assert!(matches!(err, PayloadError::Timestamp(_)));
    }

    #[test]
    fn no_text_wins_over_bad_timestamp() {
        let body = json!({ "timestamp": [1, 2] });
        assert!(extract_message(&body, received()).unwrap().is_none());
    }
}
