//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod webhook;

pub use job::{RetrieveArgs, SendArgs};
pub use webhook::WebhookCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a prompt and print its job id
    Send(SendArgs),
    /// Wait for a previously submitted job and print its result
    Retrieve(RetrieveArgs),
    /// Submit a prompt and wait for its result
    Run(SendArgs),
    /// Webhook signature helpers
    Webhook {
        #[command(subcommand)]
        command: WebhookCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Send(args) => job::send(args, config).await,
        Commands::Retrieve(args) => job::retrieve(args, config).await,
        Commands::Run(args) => job::run(args, config).await,
        Commands::Webhook { command } => webhook::handle_webhook_command(command),
    }
}
