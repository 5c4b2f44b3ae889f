//! Snapshot Fetcher and outbound send transport
//!
//! [`ApiClient`] performs one point-in-time read per call against the
//! remote HTTP source. The public fetch methods never fail across the
//! boundary: every failure path (transport, envelope shape, mapping)
//! degrades to an empty collection and emits exactly one warning event.
//! Retry cadence is owned by the poll scheduler, not this client.

use std::time::Duration;

use reqwest::Client;

use crate::api::raw::{self, ContactsEnvelope, MessagesEnvelope};
use crate::config::ApiConfig;
use crate::error::{ChatsyncError, Result};
use crate::model::{ChatMessage, ConversationSummary};

/// HTTP client for the conversation-list, message-thread and send endpoints.
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

/// Outbound payload accepted by the send endpoint.
#[derive(Debug, serde::Serialize)]
struct SendRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: SendText<'a>,
}

#[derive(Debug, serde::Serialize)]
struct SendText<'a> {
    body: &'a str,
}

impl ApiClient {
    /// Create a new client from the endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("chatsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChatsyncError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(
            contacts_url = %config.contacts_url,
            messages_url = %config.messages_url,
            "Initialized API client"
        );

        Ok(Self { http, config })
    }

    /// Fetch the conversation list.
    ///
    /// Returns an empty collection on any failure; never errors across this
    /// boundary and never retries internally.
    pub async fn fetch_conversations(&self) -> Vec<ConversationSummary> {
        match self.try_fetch_conversations().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Conversation fetch failed; treating as empty");
                Vec::new()
            }
        }
    }

    /// Fetch the message thread for one conversation.
    ///
    /// Same failure semantics as [`fetch_conversations`](Self::fetch_conversations).
    pub async fn fetch_messages(&self, chat_id: &str) -> Vec<ChatMessage> {
        match self.try_fetch_messages(chat_id).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(chat_id = %chat_id, error = %e, "Message fetch failed; treating as empty");
                Vec::new()
            }
        }
    }

    /// Send one outbound text message.
    ///
    /// The sync core only observes success or failure of this call (to
    /// decide whether the compose draft clears); delivery tracking arrives
    /// later through the regular poll cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsyncError::Send`] on a non-success response, or an
    /// HTTP error if the request could not be issued at all.
    pub async fn send_message(&self, to: &str, body: &str) -> Result<()> {
        let payload = SendRequest {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: SendText { body },
        };

        let mut request = self.http.post(&self.config.send_url).json(&payload);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatsyncError::Send(format!("HTTP {}", status)).into());
        }

        tracing::debug!(to = %to, "Message accepted by send endpoint");
        Ok(())
    }

    /// Fallible variant of [`fetch_conversations`](Self::fetch_conversations),
    /// used by poll schedulers that keep stale data on a failed cycle.
    pub(crate) async fn try_fetch_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let response = self.http.get(&self.config.contacts_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatsyncError::Fetch(format!("HTTP {}", status)).into());
        }

        let envelope: ContactsEnvelope = response
            .json()
            .await
            .map_err(|e| ChatsyncError::Envelope(format!("Malformed contacts payload: {}", e)))?;

        if !envelope.success {
            return Err(ChatsyncError::Envelope("success flag not set".to_string()).into());
        }
        let contacts = envelope
            .contacts
            .ok_or_else(|| ChatsyncError::Envelope("contacts array missing".to_string()))?;

        Ok(contacts.into_iter().map(raw::map_contact).collect())
    }

    /// Fallible variant of [`fetch_messages`](Self::fetch_messages).
    pub(crate) async fn try_fetch_messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>> {
        let response = self
            .http
            .get(&self.config.messages_url)
            .query(&[("contact_id", chat_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatsyncError::Fetch(format!("HTTP {}", status)).into());
        }

        let envelope: MessagesEnvelope = response
            .json()
            .await
            .map_err(|e| ChatsyncError::Envelope(format!("Malformed messages payload: {}", e)))?;

        if !envelope.success {
            return Err(ChatsyncError::Envelope("success flag not set".to_string()).into());
        }
        let messages = envelope
            .messages
            .ok_or_else(|| ChatsyncError::Envelope("messages array missing".to_string()))?;

        Ok(messages.into_iter().map(raw::map_message).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> ApiConfig {
        ApiConfig {
            contacts_url: "http://127.0.0.1:9/contacts.php".to_string(),
            messages_url: "http://127.0.0.1:9/messages.php".to_string(),
            send_url: "http://127.0.0.1:9/send".to_string(),
            auth_token: None,
            request_timeout_secs: 1,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(ApiConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_conversations_unreachable_returns_empty() {
        let client = ApiClient::new(unreachable_config()).unwrap();
        let items = client.fetch_conversations().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_messages_unreachable_returns_empty() {
        let client = ApiClient::new(unreachable_config()).unwrap();
        let items = client.fetch_messages("12").await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_send_message_unreachable_is_error() {
        let client = ApiClient::new(unreachable_config()).unwrap();
        let result = client.send_message("+123", "hello").await;
        assert!(result.is_err());
    }
}
