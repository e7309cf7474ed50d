//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod config;
pub mod send;
pub mod serve;

/// Chirp - chat relay with WebSocket fan-out
#[derive(Parser)]
#[command(name = "chirp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server
    Serve(serve::ServeArgs),

    /// Post a chat message to a running relay
    Send(send::SendArgs),

    /// Announce that a user is typing
    Typing(send::TypingArgs),

    /// Show the client configuration served by a relay
    Config(config::ConfigArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Send(args) => send::execute_message(args).await,
            Commands::Typing(args) => send::execute_typing(args).await,
            Commands::Config(args) => config::execute(args).await,
        }
    }
}
