//! Outbound send handler.

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Result;

/// Handle the send command
pub async fn handle_send(client: &ApiClient, chat: &str, text: &str) -> Result<()> {
    client.send_message(chat, text).await?;
    info!(chat_id = %chat, "Message accepted by transport");
    println!("{} {}", "Sent to".green(), chat.cyan());
    Ok(())
}
