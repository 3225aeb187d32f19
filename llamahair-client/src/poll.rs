//! Job status polling
//!
//! A submitted job is observed with signed `GET {base_url}/v1/out/{job_id}`
//! requests until it reaches a terminal state:
//!
//! ```text
//! Pending ──► Completed   (result returned)
//!    │   ──► Failed      (ClientError::JobFailed)
//!    │   ──► TimedOut    (ClientError::JobTimedOut, client-side deadline)
//!    └── ──► Cancelled   (ClientError::Cancelled, caller's token fired)
//! ```
//!
//! The deadline is checked once per iteration after a status response
//! arrives, so total wall-clock time may exceed it by up to one request
//! round-trip plus one poll interval.
//!
//! A failed status request ends the loop immediately with
//! [`ClientError::PollFailed`]; only non-terminal statuses are retried.

use std::time::Duration;

use llamahair_core::domain::job::{JobHandle, JobStatus};
use llamahair_core::domain::result::JobResult;
use llamahair_core::dto::job::JobStatusEnvelope;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::LlamaClient;
use crate::error::{ClientError, RequestError, Result};
use crate::signing::{self, API_KEY_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Poll loop tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Client-side bound on how long a job may stay pending
    pub deadline: Duration,
    /// Fixed delay between status requests
    pub interval: Duration,
}

impl PollOptions {
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(45);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

    pub fn new(deadline: Duration, interval: Duration) -> Self {
        Self { deadline, interval }
    }

    /// Validates the options
    pub fn validate(&self) -> Result<()> {
        if self.deadline.is_zero() {
            return Err(ClientError::Config(
                "poll deadline must be greater than 0".to_string(),
            ));
        }

        if self.interval.is_zero() {
            return Err(ClientError::Config(
                "poll interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEADLINE, Self::DEFAULT_INTERVAL)
    }
}

impl LlamaClient {
    // =============================================================================
    // Job Polling
    // =============================================================================

    /// Wait for a job to finish using the client's poll options
    ///
    /// # Arguments
    /// * `handle` - Handle returned by [`submit`](Self::submit), or rebuilt
    ///   from a job id retained elsewhere
    ///
    /// # Returns
    /// The job result once the service reports `completed`
    pub async fn await_job(&self, handle: &JobHandle) -> Result<JobResult> {
        self.await_job_with(handle, &self.poll, None).await
    }

    /// Wait for a job to finish, stopping early when `cancel` fires
    pub async fn await_job_with_cancel(
        &self,
        handle: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<JobResult> {
        self.await_job_with(handle, &self.poll, Some(cancel)).await
    }

    /// Wait for a job to finish with explicit poll options
    ///
    /// The cancellation token is checked at the top of every iteration and
    /// raced against the inter-poll delay.
    pub async fn await_job_with(
        &self,
        handle: &JobHandle,
        options: &PollOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<JobResult> {
        options.validate()?;

        let job_id = handle.job_id();
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                return Err(cancelled(job_id, attempt));
            }

            attempt += 1;

            let envelope = self
                .fetch_status(job_id)
                .await
                .map_err(|source| ClientError::PollFailed {
                    job_id: job_id.to_string(),
                    source,
                })?;

            let elapsed = started.elapsed();
            debug!(
                job_id,
                attempt,
                status = %envelope.status,
                elapsed_ms = elapsed.as_millis() as u64,
                "Polled job status"
            );

            match envelope.status {
                JobStatus::Completed => {
                    let result = envelope.response.ok_or_else(|| ClientError::PollFailed {
                        job_id: job_id.to_string(),
                        source: RequestError::MissingField("response"),
                    })?;
                    info!(job_id, attempt, elapsed_ms = elapsed.as_millis() as u64, "Job completed");
                    return Ok(result);
                }
                JobStatus::Failed => {
                    warn!(job_id, prompt_id = ?envelope.prompt_id, "Job failed");
                    return Err(ClientError::JobFailed {
                        job_id: job_id.to_string(),
                        prompt_id: envelope.prompt_id,
                    });
                }
                JobStatus::Pending | JobStatus::Other(_) => {}
            }

            if elapsed >= options.deadline {
                warn!(job_id, attempt, elapsed_ms = elapsed.as_millis() as u64, "Job timed out");
                return Err(ClientError::JobTimedOut {
                    job_id: job_id.to_string(),
                    elapsed,
                });
            }

            match cancel {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => return Err(cancelled(job_id, attempt)),
                        _ = time::sleep(options.interval) => {}
                    }
                }
                None => time::sleep(options.interval).await,
            }
        }
    }

    /// Fetch the current status of a job with one signed request
    ///
    /// # Arguments
    /// * `job_id` - The job id
    ///
    /// # Returns
    /// The raw status envelope, whatever the status
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatusEnvelope> {
        self.fetch_status(job_id)
            .await
            .map_err(|source| ClientError::PollFailed {
                job_id: job_id.to_string(),
                source,
            })
    }

    async fn fetch_status(&self, job_id: &str) -> std::result::Result<JobStatusEnvelope, RequestError> {
        let url = format!("{}/v1/out/{}", self.config.base_url, job_id);
        let timestamp = signing::unix_timestamp();
        let signature =
            signing::poll_signature(self.config.credentials.secret(), timestamp, job_id);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.config.credentials.key_id())
            .header(TIMESTAMP_HEADER, timestamp.to_string())
            .header(SIGNATURE_HEADER, signature)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

fn cancelled(job_id: &str, attempt: u32) -> ClientError {
    warn!(job_id, attempt, "Polling cancelled");
    ClientError::Cancelled {
        job_id: job_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_options() {
        let options = PollOptions::default();
        assert_eq!(options.deadline, Duration::from_secs(45));
        assert_eq!(options.interval, Duration::from_millis(250));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_poll_options_validation() {
        let mut options = PollOptions::default();

        options.deadline = Duration::ZERO;
        assert!(options.validate().is_err());

        options.deadline = Duration::from_secs(1);
        options.interval = Duration::ZERO;
        assert!(options.validate().is_err());

        options.interval = Duration::from_millis(500);
        assert!(options.validate().is_ok());
    }
}
