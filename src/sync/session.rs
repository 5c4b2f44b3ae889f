//! Session composition: conversation-list poller, thread poller and anchor
//!
//! A [`ChatSession`] owns the two scheduler instances the client needs: one
//! for the conversation list and, while a conversation is open, one for its
//! message thread. The two pollers never share mutable state; their updates
//! fan in over a single event channel in cycle order. Switching the active
//! conversation fully stops the old thread poller before the new one
//! starts, so two timers can never race into shared UI state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::SyncConfig;
use crate::error::{ChatsyncError, Result};
use crate::model::{ChatMessage, ConversationSummary};
use crate::sync::anchor::{ScrollAnchor, ScrollDecision, ScrollPosition};
use crate::sync::poller::{Poller, UpdateHandler};
use crate::sync::source::{ConversationSource, MessageSource};

/// Update delivered to the presentation layer.
#[derive(Debug)]
pub enum SessionEvent {
    /// The conversation list changed.
    InboxUpdated(Arc<Vec<ConversationSummary>>),
    /// The active message thread changed, with the viewport decision for
    /// this update.
    ThreadUpdated {
        chat_id: String,
        messages: Arc<Vec<ChatMessage>>,
        scroll: ScrollDecision,
    },
}

/// One live client session: inbox poller, optional thread poller, scroll
/// anchor and compose draft.
pub struct ChatSession {
    client: Arc<ApiClient>,
    poll_interval: Duration,
    inbox_poller: Poller<ConversationSummary>,
    thread_poller: Option<Poller<ChatMessage>>,
    active_chat: Option<String>,
    anchor: Arc<Mutex<ScrollAnchor>>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    draft: String,
}

struct InboxHandler {
    events_tx: mpsc::UnboundedSender<SessionEvent>,
}

#[async_trait]
impl UpdateHandler<ConversationSummary> for InboxHandler {
    async fn on_update(&self, collection: Arc<Vec<ConversationSummary>>) {
        // A dropped receiver just means the consumer went away.
        let _ = self.events_tx.send(SessionEvent::InboxUpdated(collection));
    }
}

struct ThreadHandler {
    chat_id: String,
    anchor: Arc<Mutex<ScrollAnchor>>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
}

#[async_trait]
impl UpdateHandler<ChatMessage> for ThreadHandler {
    async fn on_update(&self, collection: Arc<Vec<ChatMessage>>) {
        let scroll = match self.anchor.lock() {
            Ok(mut anchor) => anchor.on_collection_changed(),
            Err(_) => ScrollDecision::Hold,
        };
        let _ = self.events_tx.send(SessionEvent::ThreadUpdated {
            chat_id: self.chat_id.clone(),
            messages: collection,
            scroll,
        });
    }
}

impl ChatSession {
    /// Create a session and the event stream its pollers feed.
    pub fn new(
        client: Arc<ApiClient>,
        sync: &SyncConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let poll_interval = Duration::from_millis(sync.poll_interval_ms);

        let inbox_poller: Poller<ConversationSummary> = Poller::new(
            "inbox",
            Arc::new(ConversationSource::new(Arc::clone(&client))),
            poll_interval,
        );

        let session = Self {
            client,
            poll_interval,
            inbox_poller,
            thread_poller: None,
            active_chat: None,
            anchor: Arc::new(Mutex::new(ScrollAnchor::new(sync.scroll_tolerance))),
            events_tx,
            draft: String::new(),
        };
        (session, events_rx)
    }

    /// Start polling the conversation list.
    pub fn start(&mut self) {
        self.inbox_poller.start(Arc::new(InboxHandler {
            events_tx: self.events_tx.clone(),
        }));
    }

    /// The id of the conversation currently open, if any.
    pub fn active_chat(&self) -> Option<&str> {
        self.active_chat.as_deref()
    }

    /// Open a conversation and start polling its message thread.
    ///
    /// The previous thread poller, if any, is fully stopped first; the
    /// scroll anchor resets with the initial scroll-to-bottom request
    /// asserted.
    pub fn open_chat(&mut self, chat_id: &str) {
        if let Some(mut previous) = self.thread_poller.take() {
            previous.stop();
        }

        if let Ok(mut anchor) = self.anchor.lock() {
            anchor.on_chat_changed(true);
        }

        let mut poller: Poller<ChatMessage> = Poller::new(
            format!("thread:{}", chat_id),
            Arc::new(MessageSource::new(Arc::clone(&self.client), chat_id)),
            self.poll_interval,
        );
        poller.start(Arc::new(ThreadHandler {
            chat_id: chat_id.to_string(),
            anchor: Arc::clone(&self.anchor),
            events_tx: self.events_tx.clone(),
        }));

        info!(chat_id = %chat_id, "Conversation opened");
        self.thread_poller = Some(poller);
        self.active_chat = Some(chat_id.to_string());
        self.draft.clear();
    }

    /// Close the active conversation and stop its thread poller.
    pub fn close_chat(&mut self) {
        if let Some(mut poller) = self.thread_poller.take() {
            poller.stop();
        }
        self.active_chat = None;
        self.draft.clear();
    }

    /// Forward a user scroll event to the anchor policy.
    ///
    /// Returns where the viewport sits relative to the newest content, for
    /// the consumer's "jump to latest" affordance.
    pub fn on_scroll(&self, distance_from_bottom: f32) -> ScrollPosition {
        match self.anchor.lock() {
            Ok(mut anchor) => anchor.on_scroll(distance_from_bottom),
            Err(_) => ScrollPosition::Away,
        }
    }

    /// Clear the manual-scroll override, e.g. after the user tapped the
    /// "jump to latest" affordance.
    pub fn jump_to_latest(&self) {
        if let Ok(mut anchor) = self.anchor.lock() {
            anchor.reset_manual_scroll();
        }
    }

    /// Replace the pending compose text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Send the pending compose text to the active conversation.
    ///
    /// The draft clears only after the transport accepted the message.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsyncError::Session`] when no conversation is open or
    /// the draft is blank, and the transport error when sending fails.
    pub async fn send_draft(&mut self) -> Result<()> {
        let chat_id = self
            .active_chat
            .clone()
            .ok_or_else(|| ChatsyncError::Session("no active conversation".to_string()))?;

        if self.draft.trim().is_empty() {
            warn!("Ignoring send of empty draft");
            return Err(ChatsyncError::Session("draft is empty".to_string()).into());
        }

        self.client.send_message(&chat_id, &self.draft).await?;
        self.draft.clear();
        Ok(())
    }

    /// Stop both pollers. The session can be restarted afterwards.
    pub fn shutdown(&mut self) {
        self.close_chat();
        self.inbox_poller.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, SyncConfig};

    fn session() -> (ChatSession, mpsc::UnboundedReceiver<SessionEvent>) {
        let client = Arc::new(
            ApiClient::new(ApiConfig {
                contacts_url: "http://127.0.0.1:9/contacts.php".to_string(),
                messages_url: "http://127.0.0.1:9/messages.php".to_string(),
                send_url: "http://127.0.0.1:9/send".to_string(),
                auth_token: None,
                request_timeout_secs: 1,
            })
            .unwrap(),
        );
        ChatSession::new(client, &SyncConfig::default())
    }

    #[tokio::test]
    async fn test_open_chat_replaces_thread_poller() {
        let (mut session, _rx) = session();
        session.open_chat("12");
        assert_eq!(session.active_chat(), Some("12"));
        session.open_chat("34");
        assert_eq!(session.active_chat(), Some("34"));
        session.shutdown();
        assert_eq!(session.active_chat(), None);
    }

    #[tokio::test]
    async fn test_open_chat_resets_anchor() {
        let (mut session, _rx) = session();
        session.open_chat("12");
        // Reading older content in the first conversation.
        assert_eq!(session.on_scroll(400.0), ScrollPosition::Away);
        // Switching conversations clears the override.
        session.open_chat("34");
        assert!(!session.anchor.lock().unwrap().manual_override());
        session.shutdown();
    }

    #[tokio::test]
    async fn test_jump_to_latest_clears_override() {
        let (mut session, _rx) = session();
        session.open_chat("12");
        session.on_scroll(400.0);
        session.jump_to_latest();
        assert!(!session.anchor.lock().unwrap().manual_override());
        session.shutdown();
    }

    #[tokio::test]
    async fn test_send_draft_requires_active_chat() {
        let (mut session, _rx) = session();
        session.set_draft("hello");
        assert!(session.send_draft().await.is_err());
    }

    #[tokio::test]
    async fn test_send_draft_rejects_blank_text() {
        let (mut session, _rx) = session();
        session.open_chat("12");
        session.set_draft("   ");
        assert!(session.send_draft().await.is_err());
        session.shutdown();
    }

    #[tokio::test]
    async fn test_failed_send_keeps_draft() {
        let (mut session, _rx) = session();
        session.open_chat("12");
        session.set_draft("hello");
        // The endpoint is unreachable, so the send fails and the draft
        // must survive for a retry.
        assert!(session.send_draft().await.is_err());
        assert_eq!(session.draft(), "hello");
        session.shutdown();
    }

    #[tokio::test]
    async fn test_close_chat_clears_draft() {
        let (mut session, _rx) = session();
        session.open_chat("12");
        session.set_draft("half-typed");
        session.close_chat();
        assert_eq!(session.draft(), "");
    }
}
