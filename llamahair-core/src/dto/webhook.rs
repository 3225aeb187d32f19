//! Webhook DTOs

use serde::{Deserialize, Serialize};

/// Event type the service sends when it asks a webhook endpoint to prove
/// possession of the shared secret
pub const VALIDATE_EVENT: &str = "validate";

/// Inputs for computing a webhook validation signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookValidationRequest {
    pub timestamp: String,
    pub value: String,
}
