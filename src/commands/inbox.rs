//! One-shot conversation list handler.
//!
//! Fetches the current conversation snapshot, applies the canonical inbox
//! ordering, and prints it as a table or as JSON.

use colored::Colorize;
use prettytable::{format, Table};

use crate::api::ApiClient;
use crate::error::{ChatsyncError, Result};
use crate::model::{sort_inbox, ConversationSummary};

const PREVIEW_WIDTH: usize = 70;

/// Handle the inbox command
pub async fn handle_inbox(client: &ApiClient, json: bool) -> Result<()> {
    let mut conversations = client.fetch_conversations().await;
    sort_inbox(&mut conversations);

    if json {
        let out = serde_json::to_string_pretty(&conversations)
            .map_err(ChatsyncError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    if conversations.is_empty() {
        println!("{}", "No conversations found.".yellow());
        return Ok(());
    }

    print_table(&conversations);
    Ok(())
}

fn print_table(conversations: &[ConversationSummary]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Last Message".bold(),
        "When".bold(),
        "Agent".bold()
    ]);

    for conversation in conversations {
        let timestamp = conversation
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let agent = if conversation.agent_requested {
            "yes".red().to_string()
        } else {
            "-".to_string()
        };

        table.add_row(prettytable::row![
            conversation.id.cyan(),
            conversation.name,
            truncate_preview(&conversation.last_message),
            timestamp,
            agent
        ]);
    }

    println!("\nConversations:");
    table.printstd();
    println!();
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_WIDTH {
        let cut: String = text.chars().take(PREVIEW_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
