//! chatsync - WhatsApp inbox synchronization library
//!
//! This library provides the core functionality for keeping a messaging
//! client's view of a remote backend fresh: periodic snapshot polling,
//! change-gated reconciliation, and the scroll-anchor policy for the
//! message thread viewport.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP client and raw payload normalization
//! - `sync`: Poll scheduling, reconciliation, scroll anchor, and session composition
//! - `model`: Normalized conversation and message types
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatsync::api::ApiClient;
//! use chatsync::config::Config;
//! use chatsync::sync::ChatSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let client = Arc::new(ApiClient::new(config.api)?);
//!     let (mut session, mut events) = ChatSession::new(client, &config.sync);
//!     session.start();
//!     if let Some(event) = events.recv().await {
//!         println!("{:?}", event);
//!     }
//!     session.shutdown();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod sync;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{ChatsyncError, Result};
pub use model::{ChatMessage, ConversationSummary, MessageStatus};
pub use sync::{ChatSession, Poller, Reconciler, ScrollAnchor, SessionEvent};

#[cfg(test)]
pub mod test_utils;
