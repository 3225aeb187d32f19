//! LlamaHair HTTP Client
//!
//! Client for the LlamaHair asynchronous prompt API. A prompt is submitted,
//! the service answers with a job id, and the result is fetched later by
//! polling until the job completes, fails or a client-side deadline passes.
//!
//! Every request is authenticated with a per-request HMAC-SHA256 signature
//! (see [`signing`]) rather than a static bearer token.
//!
//! # Example
//!
//! ```no_run
//! use llamahair_client::{ClientOptions, LlamaClient};
//! use llamahair_core::dto::job::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LlamaClient::new(ClientOptions::new("key-id", "secret"))?;
//!
//!     let result = client
//!         .submit_and_await(
//!             "https://api.llamahair.ai/v1/prompt/my-prompt",
//!             &JobRequest::new("req-1", "Summarise this text"),
//!         )
//!         .await?;
//!
//!     println!("{:?}", result.response.summary);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod poll;
pub mod signing;
mod submit;
pub mod webhook;

// Re-export commonly used types
pub use config::{ClientConfig, ClientOptions, Credentials};
pub use error::{ClientError, RequestError, Result};
pub use poll::PollOptions;
pub use tokio_util::sync::CancellationToken;
pub use webhook::WebhookValidator;

use llamahair_core::domain::result::JobResult;
use llamahair_core::dto::job::JobRequest;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Timeout applied to each individual HTTP request by [`LlamaClient::new`]
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the LlamaHair API
///
/// Cheap to clone; clones share the underlying connection pool. Concurrent
/// calls share nothing else: each submission and each poll loop owns its own
/// handle, timer and state.
#[derive(Debug, Clone)]
pub struct LlamaClient {
    config: ClientConfig,
    poll: PollOptions,
    client: Client,
}

impl LlamaClient {
    /// Create a new client
    ///
    /// Credentials and base URL are resolved once here; environment
    /// variables override `options` (see [`config`]).
    pub fn new(options: ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(options, client)
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(options: ClientOptions, client: Client) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::resolve(options)?, client))
    }

    /// Create a client from an already resolved configuration
    ///
    /// No environment lookup happens here.
    pub fn from_config(config: ClientConfig, client: Client) -> Self {
        Self {
            config,
            poll: PollOptions::default(),
            client,
        }
    }

    /// Replace the default poll deadline and interval
    pub fn with_poll_options(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    /// Get the resolved base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the resolved API key id
    pub fn key_id(&self) -> &str {
        self.config.credentials.key_id()
    }

    pub fn poll_options(&self) -> &PollOptions {
        &self.poll
    }

    /// Submit a prompt and wait for its result
    ///
    /// Polling only starts once submission has produced a handle. A failed
    /// submission is returned as-is and no status request is ever made.
    pub async fn submit_and_await(&self, prompt_url: &str, request: &JobRequest) -> Result<JobResult> {
        let handle = self.submit(prompt_url, request).await?;
        self.await_job(&handle).await
    }

    /// Like [`submit_and_await`](Self::submit_and_await), but polling stops
    /// with [`ClientError::Cancelled`] once `cancel` fires
    pub async fn submit_and_await_with_cancel(
        &self,
        prompt_url: &str,
        request: &JobRequest,
        cancel: &CancellationToken,
    ) -> Result<JobResult> {
        let handle = self.submit(prompt_url, request).await?;
        self.await_job_with(&handle, &self.poll, Some(cancel)).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize a JSON body
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> std::result::Result<T, RequestError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RequestError::status(status.as_u16(), error_text));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| RequestError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            credentials: Credentials::new("key", "secret"),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_client_from_config() {
        let client = LlamaClient::from_config(config("http://localhost:8080"), Client::new());
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.key_id(), "key");
        assert_eq!(client.poll_options(), &PollOptions::default());
    }

    #[test]
    fn test_with_poll_options() {
        let poll = PollOptions::new(Duration::from_secs(5), Duration::from_millis(500));
        let client = LlamaClient::from_config(config("http://localhost:8080"), Client::new())
            .with_poll_options(poll.clone());
        assert_eq!(client.poll_options(), &poll);
    }
}
