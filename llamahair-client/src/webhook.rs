//! Webhook validation
//!
//! When a webhook endpoint is registered, the service sends a `validate`
//! event carrying a timestamp and a challenge value. The endpoint proves it
//! holds the shared secret by answering with
//! `hex(HMAC-SHA256(secret, timestamp ++ value))`.
//!
//! Delivery itself is handled by the service; this module only computes and
//! checks signatures.

use std::fmt;

use llamahair_core::dto::webhook::{VALIDATE_EVENT, WebhookValidationRequest};

use crate::signing;

/// Stateless webhook signature checker
#[derive(Clone)]
pub struct WebhookValidator {
    secret: String,
}

impl WebhookValidator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Whether an inbound webhook body is a validation challenge
    pub fn should_validate(&self, body: &serde_json::Value) -> bool {
        body.get("type").and_then(|t| t.as_str()) == Some(VALIDATE_EVENT)
    }

    /// Compute the signature to answer a validation challenge with
    pub fn validate(&self, req: &WebhookValidationRequest) -> String {
        signing::webhook_signature(&self.secret, &req.timestamp, &req.value)
    }

    /// Check an inbound signature in constant time
    ///
    /// Hex case is ignored.
    pub fn verify(&self, req: &WebhookValidationRequest, signature: &str) -> bool {
        let expected = self.validate(req);
        signing::constant_time_eq(
            expected.as_bytes(),
            signature.trim().to_ascii_lowercase().as_bytes(),
        )
    }
}

impl fmt::Debug for WebhookValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookValidator")
            .field("secret", &"<redacted>")
            .finish()
    }
}
