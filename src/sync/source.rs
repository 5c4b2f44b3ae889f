//! Snapshot source seam between the poll scheduler and the HTTP client
//!
//! Pollers depend on this trait rather than on [`ApiClient`] directly so
//! that scheduler behavior can be tested with in-process fakes and driven
//! by a paused clock.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::error::Result;
use crate::model::{ChatMessage, ConversationSummary};

/// One point-in-time read of a remote collection.
///
/// An `Err` marks a failed cycle; the scheduler logs it and keeps the
/// previously reconciled data rather than clearing state.
#[async_trait]
pub trait SnapshotSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<Vec<T>>;
}

/// Conversation-list source backed by the HTTP client.
pub struct ConversationSource {
    client: Arc<ApiClient>,
}

impl ConversationSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotSource<ConversationSummary> for ConversationSource {
    async fn fetch(&self) -> Result<Vec<ConversationSummary>> {
        self.client.try_fetch_conversations().await
    }
}

/// Message-thread source backed by the HTTP client, scoped to one
/// conversation id.
pub struct MessageSource {
    client: Arc<ApiClient>,
    chat_id: String,
}

impl MessageSource {
    pub fn new(client: Arc<ApiClient>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource<ChatMessage> for MessageSource {
    async fn fetch(&self) -> Result<Vec<ChatMessage>> {
        self.client.try_fetch_messages(&self.chat_id).await
    }
}
