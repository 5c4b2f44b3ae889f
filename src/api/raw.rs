//! Wire-format records and the mapping boundary
//!
//! The remote source is loose about types: ids arrive as numbers or
//! strings, flags arrive as booleans, 0/1 integers or `"true"` strings, and
//! most fields can be absent. Everything is normalized here, once, so the
//! rest of the pipeline never observes a missing or ambiguous value.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer};

use crate::model::{ChatMessage, ConversationSummary, MessageStatus};

/// Placeholder avatar used for every contact (the source carries none).
pub const DEFAULT_AVATAR: &str = "/assets/images/default.jpeg";

/// Preview text substituted when a conversation has no messages yet.
pub const EMPTY_PREVIEW: &str = "No messages yet";

/// Body text substituted when a message row has no body.
pub const EMPTY_BODY: &str = "No content";

/// Envelope returned by the conversation-list endpoint.
#[derive(Debug, Deserialize)]
pub struct ContactsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub contacts: Option<Vec<RawContact>>,
}

/// Envelope returned by the message-thread endpoint.
#[derive(Debug, Deserialize)]
pub struct MessagesEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Option<Vec<RawMessage>>,
}

/// One contact row as the server sends it.
#[derive(Debug, Deserialize)]
pub struct RawContact {
    #[serde(default, deserialize_with = "de_loose_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub wa_id: Option<String>,
    #[serde(default)]
    pub last_message_body: Option<String>,
    #[serde(default)]
    pub last_message_timestamp: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_message_direction: Option<String>,
    #[serde(default, deserialize_with = "de_loose_flag")]
    pub is_robot: bool,
}

/// One message row as the server sends it.
#[derive(Debug, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "de_loose_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

/// Accept an id encoded as a JSON string or number.
fn de_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Accept a flag encoded as a JSON bool, 0/1 number or truthy string.
fn de_loose_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(serde_json::Value::String(s)) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true")
        }
        _ => false,
    })
}

/// Parse the handful of timestamp shapes the source produces.
///
/// Tries RFC 3339 first, then the bare `YYYY-MM-DD HH:MM:SS` form (read as
/// UTC), then integer epoch seconds. Anything else becomes `None`, which
/// sorts as the oldest possible conversation.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(secs) = raw.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }
    None
}

/// Render the display date shown next to a message.
fn display_date(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// Render the 12-hour display time shown under a message.
fn display_time(ts: &DateTime<Utc>) -> String {
    let (pm, hour) = ts.hour12();
    format!("{}:{:02} {}", hour, ts.minute(), if pm { "PM" } else { "AM" })
}

/// Map one raw contact row to a typed [`ConversationSummary`].
pub fn map_contact(raw: RawContact) -> ConversationSummary {
    let timestamp = raw
        .last_message_timestamp
        .as_deref()
        .or(raw.created_at.as_deref())
        .and_then(parse_timestamp);

    ConversationSummary {
        id: raw.id.unwrap_or_else(|| "None".to_string()),
        name: raw.wa_id.unwrap_or_else(|| "Unknown".to_string()),
        avatar: DEFAULT_AVATAR.to_string(),
        last_message: raw
            .last_message_body
            .unwrap_or_else(|| EMPTY_PREVIEW.to_string()),
        timestamp,
        status: status_for_direction(raw.last_message_direction.as_deref()),
        agent_requested: raw.is_robot,
        unread_count: 0,
        pinned: false,
        online: false,
    }
}

/// Map one raw message row to a typed [`ChatMessage`].
///
/// The display date and time are derived here, exactly once; entities never
/// re-derive them from the source timestamp later.
pub fn map_message(raw: RawMessage) -> ChatMessage {
    let parsed = raw.timestamp.as_deref().and_then(parse_timestamp);
    let (date, time) = match parsed {
        Some(ts) => (display_date(&ts), display_time(&ts)),
        None => ("Unknown".to_string(), "Invalid Time".to_string()),
    };

    ChatMessage {
        id: raw.id.unwrap_or_else(|| "None".to_string()),
        body: raw.body.unwrap_or_else(|| EMPTY_BODY.to_string()),
        from_contact: raw.direction.as_deref() == Some("incoming"),
        status: status_for_direction(raw.direction.as_deref()),
        date,
        time,
    }
}

/// Outbound rows get a concrete status; inbound rows have none.
///
/// The source historically emitted a `RECEIVED` marker for inbound rows
/// that the shared status type never declared; it is treated as "no
/// meaningful status" rather than a fourth variant.
fn status_for_direction(direction: Option<&str>) -> Option<MessageStatus> {
    match direction {
        Some("outgoing") => Some(MessageStatus::Sent),
        _ => None,
    }
}
