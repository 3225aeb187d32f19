//! Job DTOs for submission and status polling

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobHandle, JobStatus};
use crate::domain::result::JobResult;

/// Request to run a prompt
///
/// `body` is arbitrary JSON; the client treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub id: String,
    pub body: serde_json::Value,
}

impl JobRequest {
    pub fn new(id: impl Into<String>, body: impl Into<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// Successful submission response
///
/// Only `job_id` is read; any other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub job_id: Option<String>,
}

impl SubmitResponse {
    /// Convert into a handle, rejecting a missing or empty job id
    pub fn into_handle(self) -> Option<JobHandle> {
        self.job_id
            .filter(|id| !id.is_empty())
            .map(JobHandle::from)
    }
}

/// Status envelope returned by `GET /v1/out/{job_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusEnvelope {
    pub status: JobStatus,
    #[serde(default)]
    pub prompt_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Only meaningful when `status` is `completed`
    #[serde(default, alias = "result")]
    pub response: Option<JobResult>,
}

impl JobStatusEnvelope {
    pub fn started_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.start_time?, 0)
    }

    pub fn ended_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.end_time?, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_id_and_body() {
        let req = JobRequest::new("req-1", "hello");
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"id":"req-1","body":"hello"}"#);
    }

    #[test]
    fn test_submit_response_extra_fields_ignored() {
        let resp: SubmitResponse =
            serde_json::from_str(r#"{"job_id":"abc","queued":true}"#).unwrap();
        assert_eq!(resp.into_handle(), Some(JobHandle::from("abc")));
    }

    #[test]
    fn test_submit_response_missing_or_empty_job_id() {
        let resp: SubmitResponse = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(resp.into_handle().is_none());

        let resp: SubmitResponse = serde_json::from_str(r#"{"job_id":""}"#).unwrap();
        assert!(resp.into_handle().is_none());
    }

    #[test]
    fn test_pending_envelope() {
        let env: JobStatusEnvelope = serde_json::from_str(
            r#"{"status":"pending","prompt_id":"p1","team_id":"t1","start_time":1704067200}"#,
        )
        .unwrap();
        assert_eq!(env.status, JobStatus::Pending);
        assert_eq!(env.prompt_id.as_deref(), Some("p1"));
        assert!(env.response.is_none());
        assert!(env.ended_at().is_none());
        assert!(env.started_at().is_some());
    }

    #[test]
    fn test_completed_envelope_accepts_result_alias() {
        let env: JobStatusEnvelope = serde_json::from_value(serde_json::json!({
            "status": "completed",
            "prompt_id": "p1",
            "team_id": "t1",
            "start_time": 1,
            "end_time": 2,
            "result": { "id": "r", "identifier": "i", "timestamp": 2, "response": { "output": "ok" } }
        }))
        .unwrap();
        assert_eq!(env.status, JobStatus::Completed);
        let result = env.response.unwrap();
        assert_eq!(result.response.output.as_deref(), Some("ok"));
    }
}
