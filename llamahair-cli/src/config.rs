//! Configuration module
//!
//! Collects the values given on the command line. Environment overrides for
//! credentials and base URL are applied by the client when it is built.

use anyhow::{Context, Result};
use llamahair_client::{ClientOptions, LlamaClient, PollOptions};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Constructor values for the API client
    pub options: ClientOptions,
    /// Poll deadline and interval
    pub poll: PollOptions,
}

impl Config {
    /// Build an API client from this configuration
    pub fn client(&self) -> Result<LlamaClient> {
        self.poll.validate()?;

        let client = LlamaClient::new(self.options.clone())
            .context("Failed to configure LlamaHair client")?;

        Ok(client.with_poll_options(self.poll.clone()))
    }
}
