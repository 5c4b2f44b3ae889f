//! Change-gated reconciliation of fetched snapshots
//!
//! Remote reads are frequent and mostly idempotent. The reconciler is the
//! gate that keeps those reads from turning into downstream churn: a fresh
//! snapshot replaces the held collection only when it is structurally
//! different after canonical ordering; otherwise the previous collection is
//! returned untouched, as the same shared reference.

use std::sync::Arc;

use crate::model::{self, ChatMessage, ConversationSummary};

/// Canonical ordering applied to a snapshot before comparison.
///
/// Collections with no ordering rule keep the source's arrival order via
/// the default no-op.
pub trait CanonicalOrder {
    fn canonicalize(_items: &mut [Self])
    where
        Self: Sized,
    {
    }
}

impl CanonicalOrder for ConversationSummary {
    fn canonicalize(items: &mut [Self]) {
        model::sort_inbox(items);
    }
}

// Message threads preserve source order; the engine never re-sorts them.
impl CanonicalOrder for ChatMessage {}

/// Result of one reconciliation cycle.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    /// The collection to hold after this cycle. On `changed == false` this
    /// is the exact previous reference (`Arc` pointer equality holds).
    pub collection: Arc<Vec<T>>,
    pub changed: bool,
}

/// Holds the current collection for one scheduler instance and decides,
/// per incoming snapshot, whether downstream state should change.
#[derive(Debug)]
pub struct Reconciler<T> {
    current: Arc<Vec<T>>,
}

impl<T> Default for Reconciler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Reconciler<T> {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Vec::new()),
        }
    }

    /// The collection held after the most recent cycle.
    pub fn current(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.current)
    }
}

impl<T: CanonicalOrder + PartialEq> Reconciler<T> {
    /// Compare an incoming snapshot against the held collection.
    ///
    /// The incoming snapshot is canonically ordered first; any difference
    /// in membership, field values or order counts as a change. On no
    /// change the held reference is returned unchanged, which is what lets
    /// consumers skip redundant re-renders.
    pub fn reconcile(&mut self, mut incoming: Vec<T>) -> Outcome<T> {
        T::canonicalize(&mut incoming);

        if *self.current == incoming {
            return Outcome {
                collection: Arc::clone(&self.current),
                changed: false,
            };
        }

        self.current = Arc::new(incoming);
        Outcome {
            collection: Arc::clone(&self.current),
            changed: true,
        }
    }
}
