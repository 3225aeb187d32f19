//! Job submission

use llamahair_core::domain::job::JobHandle;
use llamahair_core::dto::job::{JobRequest, SubmitResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info};

use crate::LlamaClient;
use crate::error::{ClientError, RequestError, Result};
use crate::signing::{self, API_KEY_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};

impl LlamaClient {
    // =============================================================================
    // Job Submission
    // =============================================================================

    /// Submit a prompt for asynchronous execution
    ///
    /// # Arguments
    /// * `prompt_url` - Full URL of the prompt endpoint (not relative to the base URL)
    /// * `request` - The prompt request
    ///
    /// # Returns
    /// A handle to poll with [`await_job`](Self::await_job)
    ///
    /// Submission is never retried: creating a job is not idempotent, so the
    /// caller decides whether a failed submission should be sent again. Any
    /// transport error, non-2xx status or response without a `job_id` is a
    /// [`ClientError::SubmissionFailed`].
    pub async fn submit(&self, prompt_url: &str, request: &JobRequest) -> Result<JobHandle> {
        // The signed bytes and the sent bytes must be identical.
        let body = serde_json::to_vec(request)?;
        let timestamp = signing::unix_timestamp();
        let signature =
            signing::submission_signature(self.config.credentials.secret(), timestamp, &body);

        debug!(request_id = %request.id, %prompt_url, "Submitting job");

        let response = self
            .client
            .post(prompt_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, self.config.credentials.key_id())
            .header(TIMESTAMP_HEADER, timestamp.to_string())
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::SubmissionFailed(e.into()))?;

        let handle = self
            .handle_response::<SubmitResponse>(response)
            .await
            .and_then(|resp| resp.into_handle().ok_or(RequestError::MissingField("job_id")))
            .map_err(ClientError::SubmissionFailed)?;

        info!(request_id = %request.id, job_id = %handle, "Job submitted");

        Ok(handle)
    }
}
