//! Error types for chatsync
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.
//!
//! Note that the synchronization core itself has no fatal errors: fetch
//! failures degrade to an empty snapshot and the next poll cycle is the
//! implicit retry. The variants here exist for the fallible edges of the
//! crate (configuration loading, client construction, outbound sends) and
//! for labelling failure events before they are logged.

use thiserror::Error;

/// Main error type for chatsync operations
#[derive(Error, Debug)]
pub enum ChatsyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote read failed at the transport level (connect, timeout, non-2xx)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Response envelope was malformed (missing success flag, no array payload)
    #[error("Envelope error: {0}")]
    Envelope(String),

    /// Outbound message delivery failed
    #[error("Send error: {0}")]
    Send(String),

    /// Session-level misuse (e.g. sending with no active conversation)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for chatsync operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
