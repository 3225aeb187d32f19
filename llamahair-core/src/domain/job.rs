//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque capability for polling a submitted job
///
/// Produced by a submission. Holding one does not guarantee that the job
/// still exists or will ever complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.job_id)
    }
}

impl From<String> for JobHandle {
    fn from(job_id: String) -> Self {
        Self { job_id }
    }
}

impl From<&str> for JobHandle {
    fn from(job_id: &str) -> Self {
        Self::new(job_id)
    }
}

/// Job status as reported by the service
///
/// The service may introduce new values at any time; anything that is not
/// `completed` or `failed` is kept verbatim in [`JobStatus::Other`] and is
/// treated as still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
    Other(String),
}

impl JobStatus {
    /// Whether polling must stop once this status is observed
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Other(s) => s,
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => JobStatus::Pending,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        let status: JobStatus = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(status, JobStatus::Completed);

        let status: JobStatus = serde_json::from_str(r#""failed""#).unwrap();
        assert_eq!(status, JobStatus::Failed);

        let status: JobStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(status, JobStatus::Pending);
    }

    #[test]
    fn test_unknown_status_is_kept_and_not_terminal() {
        let status: JobStatus = serde_json::from_str(r#""processing""#).unwrap();
        assert_eq!(status, JobStatus::Other("processing".to_string()));
        assert!(!status.is_terminal());
        assert_eq!(status.to_string(), "processing");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
    }

    #[test]
    fn test_handle_display() {
        let handle = JobHandle::from("abc");
        assert_eq!(handle.to_string(), "abc");
        assert_eq!(handle.job_id(), "abc");
    }
}
