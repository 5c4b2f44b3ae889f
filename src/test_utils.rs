//! Shared fakes for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::model::ChatMessage;
use crate::sync::poller::UpdateHandler;
use crate::sync::source::SnapshotSource;

fn message(id: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        body: format!("body of {}", id),
        from_contact: true,
        status: None,
        date: "01/01/2026".to_string(),
        time: "9:00 AM".to_string(),
    }
}

/// Source that returns a different single-message snapshot on every fetch,
/// so each poll cycle reconciles as changed.
pub struct CountingSource {
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource<ChatMessage> for CountingSource {
    async fn fetch(&self) -> Result<Vec<ChatMessage>> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(vec![message(&format!("m{}", n))])
    }
}

/// Handler that forwards every delivered collection over a channel for the
/// test body to assert on.
pub struct RecordingHandler {
    tx: mpsc::UnboundedSender<Arc<Vec<ChatMessage>>>,
}

impl RecordingHandler {
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<Arc<Vec<ChatMessage>>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl UpdateHandler<ChatMessage> for RecordingHandler {
    async fn on_update(&self, collection: Arc<Vec<ChatMessage>>) {
        let _ = self.tx.send(collection);
    }
}
