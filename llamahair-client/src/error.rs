//! Error types for the LlamaHair client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Cause of a single failed request to the service
#[derive(Debug, Error)]
pub enum RequestError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status code
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body returned by the service
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Response parsed but lacked a required field
    #[error("Response is missing required field `{0}`")]
    MissingField(&'static str),
}

impl RequestError {
    /// Create a status error from status code and message
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, if the service answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors that can occur when using the LlamaHair client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Job creation failed; never retried by the client
    #[error("Job submission failed: {0}")]
    SubmissionFailed(#[source] RequestError),

    /// Service reported the job as failed
    #[error("Job {job_id} failed (prompt {})", prompt_id.as_deref().unwrap_or("unknown"))]
    JobFailed {
        job_id: String,
        /// Prompt identifier reported by the service
        prompt_id: Option<String>,
    },

    /// Client-side deadline passed while the job was still pending
    #[error("Job {job_id} timed out after {elapsed:?}")]
    JobTimedOut { job_id: String, elapsed: Duration },

    /// Polling was cancelled by the caller
    #[error("Polling for job {job_id} was cancelled")]
    Cancelled { job_id: String },

    /// A status request failed; polling stops on the first such error
    #[error("Status request for job {job_id} failed: {source}")]
    PollFailed {
        job_id: String,
        #[source]
        source: RequestError,
    },

    /// Request payload could not be serialized
    #[error("Failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Job id the error relates to, when one is known
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::JobFailed { job_id, .. }
            | Self::JobTimedOut { job_id, .. }
            | Self::Cancelled { job_id }
            | Self::PollFailed { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    /// Service-side prompt id, for correlating with server logs
    pub fn prompt_id(&self) -> Option<&str> {
        match self {
            Self::JobFailed { prompt_id, .. } => prompt_id.as_deref(),
            _ => None,
        }
    }

    /// Check if this error is a client-side poll timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::JobTimedOut { .. })
    }

    /// Check if polling was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Check if the service reported the job as failed
    pub fn is_job_failure(&self) -> bool {
        matches!(self, Self::JobFailed { .. })
    }
}
