//! Configuration management for chatsync
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChatsyncError, Result};

/// Main configuration structure for chatsync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Synchronization engine configuration
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Conversation-list endpoint
    #[serde(default = "default_contacts_url")]
    pub contacts_url: String,

    /// Message-thread endpoint (parameterized by `contact_id`)
    #[serde(default = "default_messages_url")]
    pub messages_url: String,

    /// Outbound send endpoint
    #[serde(default = "default_send_url")]
    pub send_url: String,

    /// Bearer token for the send endpoint; usually supplied via
    /// `CHATSYNC_AUTH_TOKEN` rather than the config file.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_contacts_url() -> String {
    "https://route.coralcell.com/b/api/contacts.php".to_string()
}

fn default_messages_url() -> String {
    "https://route.coralcell.com/b/api/messages.php".to_string()
}

fn default_send_url() -> String {
    "https://wa.coralcell.com/process-message".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            contacts_url: default_contacts_url(),
            messages_url: default_messages_url(),
            send_url: default_send_url(),
            auth_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Synchronization engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Poll cadence for both schedulers, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Tolerance band, in layout units, within which the viewport still
    /// counts as scrolled to the bottom
    #[serde(default = "default_scroll_tolerance")]
    pub scroll_tolerance: f32,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_scroll_tolerance() -> f32 {
    crate::sync::anchor::DEFAULT_BOTTOM_TOLERANCE
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            scroll_tolerance: default_scroll_tolerance(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatsyncError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChatsyncError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(url) = std::env::var("CHATSYNC_CONTACTS_URL") {
            self.api.contacts_url = url;
        }
        if let Ok(url) = std::env::var("CHATSYNC_MESSAGES_URL") {
            self.api.messages_url = url;
        }
        if let Ok(url) = std::env::var("CHATSYNC_SEND_URL") {
            self.api.send_url = url;
        }
        if let Ok(token) = std::env::var("CHATSYNC_AUTH_TOKEN") {
            self.api.auth_token = Some(token);
        }

        if let Ok(interval) = std::env::var("CHATSYNC_POLL_INTERVAL_MS") {
            if let Ok(value) = interval.parse() {
                self.sync.poll_interval_ms = value;
            } else {
                tracing::warn!("Invalid CHATSYNC_POLL_INTERVAL_MS: {}", interval);
            }
        }
        if let Ok(tolerance) = std::env::var("CHATSYNC_SCROLL_TOLERANCE") {
            if let Ok(value) = tolerance.parse() {
                self.sync.scroll_tolerance = value;
            } else {
                tracing::warn!("Invalid CHATSYNC_SCROLL_TOLERANCE: {}", tolerance);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(interval) = cli.interval_ms {
            self.sync.poll_interval_ms = interval;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ChatsyncError::Config`] on malformed endpoint URLs, a
    /// zero poll interval, or a negative scroll tolerance
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("contacts_url", &self.api.contacts_url),
            ("messages_url", &self.api.messages_url),
            ("send_url", &self.api.send_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ChatsyncError::Config(format!("Invalid {}: {}", name, e)))?;
        }

        if self.sync.poll_interval_ms == 0 {
            return Err(
                ChatsyncError::Config("poll_interval_ms must be at least 1".to_string()).into(),
            );
        }
        if self.sync.scroll_tolerance < 0.0 {
            return Err(
                ChatsyncError::Config("scroll_tolerance must not be negative".to_string()).into(),
            );
        }
        if self.api.request_timeout_secs == 0 {
            return Err(
                ChatsyncError::Config("request_timeout_secs must be at least 1".to_string()).into(),
            );
        }

        Ok(())
    }
}
