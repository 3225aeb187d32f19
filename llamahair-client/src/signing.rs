//! HMAC-SHA256 request signing
//!
//! Every request carries `X-API-Key`, `X-Timestamp` and `X-Signature` headers.
//! The signature is computed as:
//!
//! ```text
//! hex(HMAC-SHA256(secret, hex(SHA256(payload)) ++ timestamp))
//! ```
//!
//! where `payload` is the serialized JSON body for submissions and the bare
//! job id for status polls. The timestamp is whole unix seconds and is taken
//! fresh for every request.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Sign `payload` at `timestamp` with `secret`
///
/// Deterministic for fixed inputs. Always returns 64 lowercase hex characters.
pub fn sign(secret: &str, timestamp: u64, payload: &[u8]) -> String {
    let payload_hash = hex::encode(Sha256::digest(payload));
    hmac_hex(secret, format!("{}{}", payload_hash, timestamp).as_bytes())
}

/// Signature for a job submission over the exact request body bytes
pub fn submission_signature(secret: &str, timestamp: u64, body: &[u8]) -> String {
    sign(secret, timestamp, body)
}

/// Signature for a status poll over the job id alone
pub fn poll_signature(secret: &str, timestamp: u64, job_id: &str) -> String {
    sign(secret, timestamp, job_id.as_bytes())
}

/// Signature a webhook endpoint returns for a validation challenge
///
/// Unlike request signing there is no inner hash: the MAC is taken directly
/// over `timestamp ++ value`.
pub fn webhook_signature(secret: &str, timestamp: &str, value: &str) -> String {
    hmac_hex(secret, format!("{}{}", timestamp, value).as_bytes())
}

/// Current unix time in whole seconds
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn hmac_hex(secret: &str, data: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time byte comparison
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const TS: u64 = 1704067200;

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign(SECRET, TS, b"payload");
        let b = sign(SECRET, TS, b"payload");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_changes_with_every_input() {
        let base = sign(SECRET, TS, b"payload");
        assert_ne!(base, sign("other-secret", TS, b"payload"));
        assert_ne!(base, sign(SECRET, TS + 1, b"payload"));
        assert_ne!(base, sign(SECRET, TS, b"payload2"));
    }

    #[test]
    fn test_signature_shape() {
        for payload in [&b""[..], &b"x"[..], &[0u8; 4096][..]] {
            let sig = sign(SECRET, TS, payload);
            assert_eq!(sig.len(), 64);
            assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_sign_matches_manual_construction() {
        let inner = hex::encode(Sha256::digest(b"job-123"));
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{}{}", inner, TS).as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(poll_signature(SECRET, TS, "job-123"), expected);
    }

    #[test]
    fn test_sign_known_vector() {
        // Empty key and empty payload: HMAC over sha256("") ++ "0"
        let sig = sign("", 0, b"");
        let mut mac = HmacSha256::new_from_slice(b"").unwrap();
        mac.update(b"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b8550");
        assert_eq!(sig, hex::encode(mac.finalize().into_bytes()));
    }

    #[test]
    fn test_no_collisions_for_distinct_payloads() {
        let sigs: std::collections::HashSet<String> = (0..500)
            .map(|i| sign(SECRET, TS, format!("job-{}", i).as_bytes()))
            .collect();
        assert_eq!(sigs.len(), 500);
    }

    #[test]
    fn test_webhook_signature_has_no_inner_hash() {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(b"1704067200challenge");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(webhook_signature(SECRET, "1704067200", "challenge"), expected);
        assert_ne!(sign(SECRET, TS, b"challenge"), expected);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        assert!(unix_timestamp() > TS);
    }
}
