//! Poll scheduler: drives a snapshot source at a fixed cadence
//!
//! Each [`Poller`] owns one timer and one reconciler. Cycles are strictly
//! serialized: the next tick is not processed until the previous fetch
//! settled, so at most one fetch is ever in flight per poller and update
//! notifications arrive in cycle order. The scheduler has no fatal states;
//! it runs until explicitly stopped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::sync::reconcile::{CanonicalOrder, Reconciler};
use crate::sync::source::SnapshotSource;

/// Receives the reconciled collection whenever a poll cycle detected a
/// change. Cycles that found no change, or failed, invoke nothing.
#[async_trait]
pub trait UpdateHandler<T>: Send + Sync {
    async fn on_update(&self, collection: Arc<Vec<T>>);
}

/// Periodic snapshot scheduler for one remote collection.
///
/// Construct one instance per data kind (conversation list, active message
/// thread); instances share no state. `start` is idempotent and `stop` is
/// safe to call at any time.
pub struct Poller<T> {
    label: String,
    interval: Duration,
    source: Arc<dyn SnapshotSource<T>>,
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl<T> Poller<T>
where
    T: CanonicalOrder + PartialEq + Send + Sync + 'static,
{
    /// Create a stopped poller.
    ///
    /// `label` names the poller in log events. `interval` must be non-zero
    /// (enforced by config validation).
    pub fn new(
        label: impl Into<String>,
        source: Arc<dyn SnapshotSource<T>>,
        interval: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            interval,
            source,
            cancel: None,
            handle: None,
        }
    }

    /// Whether the polling loop is currently active.
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    /// Start the polling loop.
    ///
    /// A second `start` while running is a logged no-op; there is never a
    /// second concurrent timer for the same poller.
    pub fn start(&mut self, handler: Arc<dyn UpdateHandler<T>>) {
        if self.cancel.is_some() {
            warn!(poller = %self.label, "Poller already running; start ignored");
            return;
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let source = Arc::clone(&self.source);
        let interval = self.interval;
        let label = self.label.clone();

        let handle = tokio::spawn(async move {
            let mut reconciler = Reconciler::new();
            // First cycle fires one interval after start, like the timer it
            // replaces. Delay (not burst) after a slow fetch keeps cycles
            // serialized.
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let snapshot = source.fetch().await;

                // stop() may have landed while the fetch was in flight; no
                // update may be delivered past that point.
                if token.is_cancelled() {
                    break;
                }

                let incoming = match snapshot {
                    Ok(items) => items,
                    Err(e) => {
                        warn!(poller = %label, error = %e, "Poll cycle failed; keeping previous snapshot");
                        continue;
                    }
                };

                let outcome = reconciler.reconcile(incoming);
                if outcome.changed {
                    debug!(poller = %label, count = outcome.collection.len(), "Snapshot changed");
                    handler.on_update(outcome.collection).await;
                }
            }

            debug!(poller = %label, "Polling loop exited");
        });

        info!(poller = %self.label, interval_ms = self.interval.as_millis() as u64, "Poller started");
        self.cancel = Some(cancel);
        self.handle = Some(handle);
    }

    /// Stop the polling loop.
    ///
    /// Safe to call when not running (logged no-op). After `stop` returns,
    /// no further update is delivered, even by a fetch already in flight.
    pub fn stop(&mut self) {
        match self.cancel.take() {
            Some(cancel) => {
                cancel.cancel();
                self.handle.take();
                info!(poller = %self.label, "Poller stopped");
            }
            None => {
                debug!(poller = %self.label, "Stop called while not running; ignored");
            }
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
