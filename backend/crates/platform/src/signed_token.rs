//! Signed Single-Purpose Tokens
//!
//! Compact HMAC-SHA256 signed tokens for out-of-band flows such as
//! email verification and password reset links. A token carries a
//! purpose tag, an opaque subject and an expiry timestamp, so a token
//! issued for one flow cannot be replayed against another.
//!
//! Wire format (URL-safe, no padding on base64 parts):
//!
//! ```text
//! <purpose>.<base64url(subject)>.<expires_at_ms>.<base64url(signature)>
//! ```
//!
//! The signature covers everything before the last dot.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::crypto::{constant_time_eq, from_base64_url, hmac_sha256, to_base64_url};

/// Token validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignedTokenError {
    /// Token does not have the expected structure
    #[error("Malformed token")]
    Malformed,

    /// Token was issued for a different purpose
    #[error("Token purpose mismatch")]
    WrongPurpose,

    /// Signature does not match
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token expiry timestamp is in the past
    #[error("Token has expired")]
    Expired,
}

/// Issue a signed token binding `subject` to `purpose`, valid for `ttl_secs`
pub fn issue(key: &[u8; 32], purpose: &str, subject: &str, ttl_secs: i64) -> String {
    issue_at(key, purpose, subject, now_ms() + ttl_secs * 1000)
}

/// Verify a token and return its subject
///
/// Checks structure, purpose, signature and expiry, in that order.
/// The signature is compared in constant time.
pub fn verify(key: &[u8; 32], purpose: &str, token: &str) -> Result<String, SignedTokenError> {
    verify_at(key, purpose, token, now_ms())
}

fn issue_at(key: &[u8; 32], purpose: &str, subject: &str, expires_at_ms: i64) -> String {
    debug_assert!(!purpose.contains('.'), "purpose must not contain dots");

    let payload = format!(
        "{}.{}.{}",
        purpose,
        to_base64_url(subject.as_bytes()),
        expires_at_ms
    );
    let signature = hmac_sha256(key, payload.as_bytes());
    format!("{}.{}", payload, to_base64_url(&signature))
}

fn verify_at(
    key: &[u8; 32],
    purpose: &str,
    token: &str,
    now_ms: i64,
) -> Result<String, SignedTokenError> {
    let (payload, signature_part) = token.rsplit_once('.').ok_or(SignedTokenError::Malformed)?;

    let mut parts = payload.splitn(3, '.');
    let token_purpose = parts.next().ok_or(SignedTokenError::Malformed)?;
    let subject_part = parts.next().ok_or(SignedTokenError::Malformed)?;
    let expires_part = parts.next().ok_or(SignedTokenError::Malformed)?;

    if token_purpose != purpose {
        return Err(SignedTokenError::WrongPurpose);
    }

    let signature = from_base64_url(signature_part).map_err(|_| SignedTokenError::Malformed)?;
    let expected = hmac_sha256(key, payload.as_bytes());
    if !constant_time_eq(&signature, &expected) {
        return Err(SignedTokenError::InvalidSignature);
    }

    // Only trust the expiry after the signature checks out
    let expires_at_ms: i64 = expires_part
        .parse()
        .map_err(|_| SignedTokenError::Malformed)?;
    if now_ms >= expires_at_ms {
        return Err(SignedTokenError::Expired);
    }

    let subject_bytes = from_base64_url(subject_part).map_err(|_| SignedTokenError::Malformed)?;
    String::from_utf8(subject_bytes).map_err(|_| SignedTokenError::Malformed)
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_and_verify() {
        let token = issue_at(&KEY, "email-verify", "user-123", 10_000);
        let subject = verify_at(&KEY, "email-verify", &token, 5_000).unwrap();
        assert_eq!(subject, "user-123");
    }

    #[test]
    fn test_expired_token() {
        let token = issue_at(&KEY, "email-verify", "user-123", 10_000);
        let result = verify_at(&KEY, "email-verify", &token, 10_000);
        assert_eq!(result, Err(SignedTokenError::Expired));
    }

    #[test]
    fn test_wrong_purpose() {
        let token = issue_at(&KEY, "email-verify", "user-123", 10_000);
        let result = verify_at(&KEY, "password-reset", &token, 5_000);
        assert_eq!(result, Err(SignedTokenError::WrongPurpose));
    }

    #[test]
    fn test_wrong_key() {
        let other_key = [8u8; 32];
        let token = issue_at(&KEY, "email-verify", "user-123", 10_000);
        let result = verify_at(&other_key, "email-verify", &token, 5_000);
        assert_eq!(result, Err(SignedTokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_expiry() {
        let token = issue_at(&KEY, "email-verify", "user-123", 10_000);
        let (payload, signature) = token.rsplit_once('.').unwrap();
        let (head, _expiry) = payload.rsplit_once('.').unwrap();
        let forged = format!("{}.{}.{}", head, i64::MAX, signature);
        let result = verify_at(&KEY, "email-verify", &forged, 5_000);
        assert_eq!(result, Err(SignedTokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed_token() {
        for garbage in ["", "just-one-part", "a.b", "a.b.c", "!!!.###.$$$.%%%"] {
            let result = verify_at(&KEY, "email-verify", garbage, 5_000);
            assert!(result.is_err(), "expected error for {garbage:?}");
        }
    }

    #[test]
    fn test_subject_with_dots_survives() {
        let token = issue_at(&KEY, "password-reset", "user.with.dots@example.com", 10_000);
        let subject = verify_at(&KEY, "password-reset", &token, 5_000).unwrap();
        assert_eq!(subject, "user.with.dots@example.com");
    }
}
