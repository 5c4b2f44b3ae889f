//! Synchronization core: poll scheduling, reconciliation and the
//! scroll-anchor policy
//!
//! The pipeline per scheduler instance is fetch → reconcile → notify, with
//! cycles strictly serialized. Two instances compose a client session: one
//! for the conversation list, one for the active message thread; only the
//! thread feeds the scroll-anchor policy.

pub mod anchor;
pub mod poller;
pub mod reconcile;
pub mod session;
pub mod source;

pub use anchor::{ScrollAnchor, ScrollDecision, ScrollPosition};
pub use poller::{Poller, UpdateHandler};
pub use reconcile::{CanonicalOrder, Outcome, Reconciler};
pub use session::{ChatSession, SessionEvent};
pub use source::{ConversationSource, MessageSource, SnapshotSource};
