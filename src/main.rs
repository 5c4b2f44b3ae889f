//! chatsync - WhatsApp inbox synchronization CLI
//!
#![doc = "chatsync - WhatsApp inbox synchronization CLI"]
#![doc = "Main entry point for the chatsync application."]

use std::sync::Arc;

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatsync::api::ApiClient;
use chatsync::cli::{Cli, Commands};
use chatsync::commands;
use chatsync::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let client = ApiClient::new(config.api.clone())?;

    // Execute command
    match cli.command {
        Commands::Inbox { json } => {
            tracing::debug!("Fetching conversation list");
            commands::inbox::handle_inbox(&client, json).await?;
            Ok(())
        }
        Commands::Watch { chat } => {
            if let Some(chat_id) = &chat {
                tracing::debug!("Also following conversation: {}", chat_id);
            }
            commands::watch::handle_watch(Arc::new(client), &config.sync, chat).await?;
            Ok(())
        }
        Commands::Send { chat, text } => {
            commands::send::handle_send(&client, &chat, &text).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chatsync=debug"
    } else {
        "chatsync=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
