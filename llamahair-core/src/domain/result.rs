//! Job result types

use serde::{Deserialize, Serialize};

/// Result payload of a completed job
///
/// The service populates any subset of [`JobOutput`] depending on the
/// kind of prompt that was run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// Payload discriminator, `"response"` for prompt results
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub id: String,
    pub identifier: String,
    pub timestamp: i64,
    #[serde(default)]
    pub response: JobOutput,
}

impl JobResult {
    /// Result timestamp as a UTC datetime, if it is a valid unix time in seconds
    pub fn produced_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Output fields produced by a prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        default,
        alias = "extractedValues",
        skip_serializing_if = "Option::is_none"
    )]
    pub extracted_values: Option<Vec<ExtractedValue>>,
}

impl JobOutput {
    /// True when the service populated none of the output fields
    pub fn is_empty(&self) -> bool {
        self.output.is_none()
            && self.outputs.is_none()
            && self.summary.is_none()
            && self.extracted_values.is_none()
    }

    /// Look up an extracted value by key
    pub fn extracted(&self, key: &str) -> Option<&str> {
        self.extracted_values
            .as_ref()?
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }
}

/// A single key/value pair extracted by a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedValue {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_output() {
        let result: JobResult = serde_json::from_value(serde_json::json!({
            "type": "response",
            "id": "r1",
            "identifier": "invoice",
            "timestamp": 1704067200,
            "response": {
                "summary": "two line items",
                "extracted_values": [{ "key": "total", "value": "42.00" }]
            }
        }))
        .unwrap();

        assert_eq!(result.kind.as_deref(), Some("response"));
        assert_eq!(result.response.summary.as_deref(), Some("two line items"));
        assert!(result.response.output.is_none());
        assert_eq!(result.response.extracted("total"), Some("42.00"));
        assert_eq!(result.response.extracted("missing"), None);
        assert!(!result.response.is_empty());
        assert_eq!(
            result.produced_at().map(|t| t.to_rfc3339()),
            Some("2024-01-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_missing_response_is_empty() {
        let result: JobResult = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "identifier": "x",
            "timestamp": 0
        }))
        .unwrap();

        assert!(result.response.is_empty());
        assert!(result.kind.is_none());
    }
}
