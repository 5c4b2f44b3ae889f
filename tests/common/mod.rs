//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use chatsync::error::Result;
use chatsync::model::ChatMessage;
use chatsync::sync::{SnapshotSource, UpdateHandler};

pub fn message(id: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        body: format!("body of {}", id),
        from_contact: true,
        status: None,
        date: "01/01/2026".to_string(),
        time: "9:00 AM".to_string(),
    }
}

/// One step of a scripted fetch sequence.
pub enum Step {
    Items(Vec<ChatMessage>),
    Fail,
}

/// Source that plays back a fixed fetch script, repeating the final step
/// once the script is exhausted.
pub struct ScriptedSource {
    script: Vec<Step>,
    cursor: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Step>) -> Self {
        assert!(!script.is_empty(), "script must have at least one step");
        Self {
            script,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource<ChatMessage> for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<ChatMessage>> {
        let n = self.cursor.fetch_add(1, Ordering::SeqCst);
        let step = &self.script[n.min(self.script.len() - 1)];
        match step {
            Step::Items(items) => Ok(items.clone()),
            Step::Fail => Err(anyhow::anyhow!("scripted fetch failure")),
        }
    }
}

/// Source that returns a different single-message snapshot on every fetch.
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

/// Source whose fetch announces itself and then blocks until released,
/// for exercising stop-while-a-fetch-is-in-flight.
pub struct GatedSource {
    started_tx: mpsc::UnboundedSender<()>,
    gate: Arc<Notify>,
}

impl GatedSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<()>, Arc<Notify>) {
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        let gate = Arc::new(Notify::new());
        (
            Self {
                started_tx,
                gate: Arc::clone(&gate),
            },
            started_rx,
            gate,
        )
    }
}

#[async_trait]
impl SnapshotSource<ChatMessage> for GatedSource {
    async fn fetch(&self) -> Result<Vec<ChatMessage>> {
        let _ = self.started_tx.send(());
        self.gate.notified().await;
        Ok(vec![message("gated")])
    }
}

/// Handler that forwards every delivered collection over a channel.
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
