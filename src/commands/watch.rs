//! Live watch handler.
//!
//! Builds a [`ChatSession`], starts the conversation-list poller (and
//! optionally one thread poller), and prints every reconciled change until
//! the user interrupts with Ctrl-C.

use std::sync::Arc;

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::sync::{ChatSession, ScrollDecision, SessionEvent};

/// Handle the watch command
pub async fn handle_watch(
    client: Arc<ApiClient>,
    sync: &SyncConfig,
    chat: Option<String>,
) -> Result<()> {
    let (mut session, mut events) = ChatSession::new(client, sync);
    session.start();
    if let Some(chat_id) = &chat {
        session.open_chat(chat_id);
    }

    info!(
        interval_ms = sync.poll_interval_ms,
        "Watching for changes, press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => {
                match event {
                    Some(event) => print_event(&event),
                    None => break,
                }
            }
        }
    }

    session.shutdown();
    println!("{}", "Stopped.".yellow());
    Ok(())
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::InboxUpdated(conversations) => {
            println!(
                "{} {} conversations",
                "inbox changed:".green(),
                conversations.len()
            );
            for conversation in conversations.iter() {
                println!(
                    "  {} {} {}",
                    conversation.id.cyan(),
                    conversation.name,
                    conversation.last_message.dimmed()
                );
            }
        }
        SessionEvent::ThreadUpdated {
            chat_id,
            messages,
            scroll,
        } => {
            let viewport = match scroll {
                ScrollDecision::ScrollToLatest => "following",
                ScrollDecision::Hold => "held",
            };
            println!(
                "{} {} ({} messages, viewport {})",
                "thread changed:".green(),
                chat_id.cyan(),
                messages.len(),
                viewport
            );
            if let Some(latest) = messages.last() {
                let who = if latest.from_contact { "them" } else { "me" };
                println!("  [{} {}] {}: {}", latest.date, latest.time, who, latest.body);
            }
        }
    }
}
