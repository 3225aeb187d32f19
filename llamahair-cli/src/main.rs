//! LlamaHair CLI
//!
//! Command-line interface for submitting prompts to the LlamaHair API and
//! retrieving their results.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use llamahair_client::{ClientOptions, PollOptions};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "llamahair")]
#[command(about = "LlamaHair prompt API CLI", long_about = None)]
struct Cli {
    /// API key id (LLAMAHAIR_API_KEY_ID takes precedence)
    #[arg(long, global = true, default_value = "")]
    api_key_id: String,

    /// API secret (LLAMAHAIR_API_SECRET takes precedence)
    #[arg(long, global = true, default_value = "", hide_default_value = true)]
    api_secret: String,

    /// API base URL (LLAMAHAIR_BASE_URL takes precedence)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Give up waiting for a result after this many milliseconds
    #[arg(
        long,
        global = true,
        env = "LLAMAHAIR_POLL_TIMEOUT_MS",
        default_value_t = 45_000
    )]
    timeout_ms: u64,

    /// Delay between status requests in milliseconds
    #[arg(
        long,
        global = true,
        env = "LLAMAHAIR_POLL_INTERVAL_MS",
        default_value_t = 250
    )]
    interval_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so results on stdout stay pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llamahair=info,llamahair_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        options: ClientOptions {
            api_key_id: cli.api_key_id,
            api_key_secret: cli.api_secret,
            base_url: cli.base_url,
        },
        poll: PollOptions::new(
            Duration::from_millis(cli.timeout_ms),
            Duration::from_millis(cli.interval_ms),
        ),
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "llamahair",
            "retrieve",
            "abc",
            "--timeout-ms",
            "1000",
            "--api-key-id",
            "key",
        ])
        .unwrap();
        assert_eq!(cli.timeout_ms, 1000);
        assert_eq!(cli.api_key_id, "key");
    }
}
