//! Webhook command handlers

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use llamahair_client::WebhookValidator;
use llamahair_core::dto::webhook::WebhookValidationRequest;

/// Webhook subcommands
#[derive(Subcommand)]
pub enum WebhookCommands {
    /// Compute the answer to a validation challenge
    Sign {
        /// Webhook secret
        #[arg(long, env = "LLAMAHAIR_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,
        /// Timestamp sent with the challenge
        #[arg(long)]
        timestamp: String,
        /// Challenge value
        #[arg(long)]
        value: String,
    },
    /// Check a signature against a challenge
    Verify {
        /// Webhook secret
        #[arg(long, env = "LLAMAHAIR_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,
        /// Timestamp sent with the challenge
        #[arg(long)]
        timestamp: String,
        /// Challenge value
        #[arg(long)]
        value: String,
        /// Signature to check
        #[arg(long)]
        signature: String,
    },
}

/// Handle webhook commands
pub fn handle_webhook_command(command: WebhookCommands) -> Result<()> {
    match command {
        WebhookCommands::Sign {
            secret,
            timestamp,
            value,
        } => {
            let validator = WebhookValidator::new(secret);
            println!(
                "{}",
                validator.validate(&WebhookValidationRequest { timestamp, value })
            );
            Ok(())
        }
        WebhookCommands::Verify {
            secret,
            timestamp,
            value,
            signature,
        } => {
            let validator = WebhookValidator::new(secret);
            if validator.verify(&WebhookValidationRequest { timestamp, value }, &signature) {
                println!("{}", "✓ Signature matches".green());
                Ok(())
            } else {
                bail!("Signature does not match")
            }
        }
    }
}
