//! Command-line interface definition for chatsync
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for inbox listing, live watching, and sending.

use clap::{Parser, Subcommand};

/// chatsync - WhatsApp inbox synchronization CLI
///
/// Polls a remote messaging backend for conversation and message
/// snapshots, reconciles them locally, and reports changes.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the poll interval in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for chatsync
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch the conversation list once and print it
    Inbox {
        /// Print the raw collection as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Poll for changes and print updates until interrupted
    Watch {
        /// Also follow one conversation's message thread
        #[arg(long)]
        chat: Option<String>,
    },

    /// Send a text message to a conversation
    Send {
        /// Recipient conversation id (wa_id)
        #[arg(long)]
        chat: String,

        /// Message body
        #[arg(long)]
        text: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
