//! Typed entities held by the synchronization core
//!
//! Each poll cycle produces a brand-new collection of these values; nothing
//! is mutated in place. Downstream consumers only ever see a collection
//! replaced wholesale (when the reconciler detected a change) or the
//! previous collection retained.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery status of an outbound message.
///
/// Inbound records carry no meaningful status; they map to `None` at the
/// boundary rather than to an extra variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

/// One entry in the conversation list.
///
/// `id` is stable across fetch cycles and is the sole merge key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub name: String,
    pub avatar: String,
    /// Preview text of the most recent message.
    pub last_message: String,
    /// Timestamp of the most recent message; `None` sorts as the oldest.
    pub timestamp: Option<DateTime<Utc>>,
    /// Status of the most recent message, when it was outbound.
    pub status: Option<MessageStatus>,
    /// The remote contact asked for a human agent; these conversations
    /// surface at the top of the list.
    pub agent_requested: bool,
    pub unread_count: u32,
    pub pinned: bool,
    pub online: bool,
}

/// One message row within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub body: String,
    /// True if the message was received from the contact, false if sent.
    pub from_contact: bool,
    /// Delivery status; only meaningful when `from_contact` is false.
    pub status: Option<MessageStatus>,
    /// Display date, derived once from the source timestamp at fetch time.
    pub date: String,
    /// Display time (12-hour clock), derived once at fetch time.
    pub time: String,
}

/// Apply the canonical conversation-list ordering in place.
///
/// Agent-requesting conversations come first; within each group the most
/// recent last-message timestamp wins, and a missing timestamp sorts as the
/// oldest. The sort is stable, so applying it twice yields the same order
/// as applying it once.
pub fn sort_inbox(items: &mut [ConversationSummary]) {
    items.sort_by(|a, b| {
        b.agent_requested
            .cmp(&a.agent_requested)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
}
